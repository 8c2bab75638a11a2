//! Declarative view model: pure functions from list state to item views.

use crate::config::ViewConfig;
use crate::list::ListState;
use crate::record::{CookieRecord, DedupKey};
use std::collections::HashSet;
use std::ops::Range;

/// Which renderer a list of a given length gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    /// Build every item, a batch per frame, then attach at once
    Standard,
    /// Only the items around the viewport
    Windowed,
}

/// Lists up to and including `threshold` items render in full.
pub fn choose_strategy(len: usize, threshold: usize) -> RenderStrategy {
    if len > threshold {
        RenderStrategy::Windowed
    } else {
        RenderStrategy::Standard
    }
}

/// What an empty filtered view means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    NoCookies,
    NoMatches(String),
}

impl EmptyState {
    pub fn for_list(list: &ListState) -> Option<Self> {
        if list.filtered_len() > 0 {
            return None;
        }
        if list.is_filtered() {
            Some(EmptyState::NoMatches(list.filter_term().to_string()))
        } else {
            Some(EmptyState::NoCookies)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

/// Everything a presentation layer needs to draw one cookie row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    /// Position in the full record list
    pub record_index: usize,
    /// Position in the filtered view
    pub position: usize,
    pub name: String,
    pub domain: String,
    /// Full name as a hover hint when the name is long
    pub name_title: Option<String>,
    pub preview: String,
    pub name_highlights: Vec<Range<usize>>,
    pub preview_highlights: Vec<Range<usize>>,
    pub selected: bool,
    pub expanded: bool,
    pub details: Vec<DetailRow>,
}

/// UI-only state the view depends on besides the list itself
#[derive(Debug, Default, Clone)]
pub struct ViewState {
    pub expanded: HashSet<DedupKey>,
}

/// Build the items for a range of filtered positions.
pub fn build_items(
    list: &ListState,
    positions: Range<usize>,
    state: &ViewState,
    config: &ViewConfig,
) -> Vec<ItemView> {
    let indices = list.filtered_indices();
    let end = positions.end.min(indices.len());
    let start = positions.start.min(end);
    (start..end)
        .filter_map(|position| {
            let record_index = indices[position];
            list.records()
                .get(record_index)
                .map(|record| build_item(record, record_index, position, list, state, config))
        })
        .collect()
}

pub fn build_item(
    record: &CookieRecord,
    record_index: usize,
    position: usize,
    list: &ListState,
    state: &ViewState,
    config: &ViewConfig,
) -> ItemView {
    let term = list.filter_term();
    let preview = preview_value(&record.value, config.preview_chars);
    ItemView {
        record_index,
        position,
        name: record.name.clone(),
        domain: record.domain.clone(),
        name_title: (record.name.chars().count() > config.long_name_chars)
            .then(|| record.name.clone()),
        name_highlights: highlight_ranges(&record.name, term),
        preview_highlights: highlight_ranges(&preview, term),
        preview,
        selected: record.selected,
        expanded: state.expanded.contains(&record.dedup_key()),
        details: detail_rows(record),
    }
}

pub fn detail_rows(record: &CookieRecord) -> Vec<DetailRow> {
    vec![
        DetailRow {
            label: "Value:",
            value: record.value.clone(),
        },
        DetailRow {
            label: "Domain:",
            value: record.domain.clone(),
        },
        DetailRow {
            label: "Path:",
            value: record.path.clone(),
        },
        DetailRow {
            label: "Secure:",
            value: yes_no(record.secure).to_string(),
        },
        DetailRow {
            label: "HttpOnly:",
            value: yes_no(record.http_only).to_string(),
        },
    ]
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// First `max_chars` characters, with `...` appended when cut.
pub fn preview_value(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}

/// Byte ranges of case-insensitive, non-overlapping occurrences of `term`.
pub fn highlight_ranges(text: &str, term: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = term.trim().to_lowercase().chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    while start < text.len() {
        if let Some(len) = match_len(&text[start..], &needle).filter(|len| *len > 0) {
            ranges.push(start..start + len);
            start += len;
            continue;
        }
        start += text[start..].chars().next().map_or(1, char::len_utf8);
    }
    ranges
}

/// Byte length of the prefix of `hay` matching `needle` (already lowercased).
fn match_len(hay: &str, needle: &[char]) -> Option<usize> {
    let mut remaining = needle;
    for (offset, ch) in hay.char_indices() {
        for lower in ch.to_lowercase() {
            match remaining.split_first() {
                Some((first, rest)) if *first == lower => remaining = rest,
                Some(_) => return None,
                None => return Some(offset),
            }
        }
        if remaining.is_empty() {
            return Some(offset + ch.len_utf8());
        }
    }
    None
}
