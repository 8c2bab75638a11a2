//! In-memory cookie list with selection and a filtered view
//!
//! `ListState` owns the records. The filtered view is a list of indices into
//! them, so it is always an order-preserving subsequence and a selection flag
//! changed through either view is the same flag.

use crate::record::CookieRecord;
use log::debug;

#[derive(Debug, Default, Clone)]
pub struct ListState {
    records: Vec<CookieRecord>,
    filter_term: String,
    filtered: Vec<usize>,
    selected_count: usize,
}

/// Counts and control enablement derived from the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSummary {
    pub selected: usize,
    pub total: usize,
    /// Export, Export As and Copy
    pub export_enabled: bool,
    pub select_all_enabled: bool,
    pub deselect_all_enabled: bool,
}

impl SelectionSummary {
    pub fn label(&self) -> String {
        format!("{} of {} selected", self.selected, self.total)
    }
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every record and clear the filter.
    pub fn load(&mut self, records: Vec<CookieRecord>) {
        self.records = records;
        self.filter_term.clear();
        self.filtered = (0..self.records.len()).collect();
        self.recount();
    }

    /// Apply a trimmed, case-insensitive substring filter on name or value.
    pub fn set_filter(&mut self, term: &str) {
        self.filter_term = term.trim().to_string();
        if self.filter_term.is_empty() {
            self.filtered = (0..self.records.len()).collect();
        } else {
            let needle = self.filter_term.to_lowercase();
            self.filtered = self
                .records
                .iter()
                .enumerate()
                .filter(|(_, record)| record.matches(&needle))
                .map(|(index, _)| index)
                .collect();
        }
        debug!(
            "Filtered cookies: {} of {} match {:?}",
            self.filtered.len(),
            self.records.len(),
            self.filter_term
        );
    }

    /// Set the flag of the first record named `name` on `domain`.
    ///
    /// Path is not part of the lookup: records that differ only by path share
    /// one selection slot. Returns `false` when no record matches.
    pub fn set_selected(&mut self, name: &str, domain: &str, selected: bool) -> bool {
        match self.position(name, domain) {
            Some(index) => {
                self.records[index].selected = selected;
                self.recount();
                true
            }
            None => false,
        }
    }

    /// Flip the selection of the record `set_selected` would address.
    pub fn toggle(&mut self, name: &str, domain: &str) -> Option<bool> {
        let index = self.position(name, domain)?;
        let selected = !self.records[index].selected;
        self.records[index].selected = selected;
        self.recount();
        Some(selected)
    }

    /// Select every record in the filtered view. Hidden records keep their flag.
    pub fn select_all(&mut self) -> usize {
        self.mark_filtered(true)
    }

    /// Deselect every record in the filtered view. Hidden records keep their flag.
    pub fn deselect_all(&mut self) -> usize {
        self.mark_filtered(false)
    }

    pub fn records(&self) -> &[CookieRecord] {
        &self.records
    }

    pub fn filtered_records(&self) -> impl Iterator<Item = &CookieRecord> + '_ {
        self.filtered.iter().map(move |&index| &self.records[index])
    }

    /// Indices into [`ListState::records`] of the filtered view, in order.
    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn selected_records(&self) -> Vec<&CookieRecord> {
        self.records.iter().filter(|record| record.selected).collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected_count
    }

    pub fn filter_term(&self) -> &str {
        &self.filter_term
    }

    pub fn is_filtered(&self) -> bool {
        !self.filter_term.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn selection_summary(&self) -> SelectionSummary {
        let selected = self.selected_count;
        let total = self.records.len();
        SelectionSummary {
            selected,
            total,
            export_enabled: selected > 0,
            select_all_enabled: selected != total,
            deselect_all_enabled: selected > 0,
        }
    }

    /// Index `set_selected` resolves `(name, domain)` to.
    pub fn position(&self, name: &str, domain: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.name == name && record.domain == domain)
    }

    fn mark_filtered(&mut self, selected: bool) -> usize {
        for &index in &self.filtered {
            self.records[index].selected = selected;
        }
        self.recount();
        self.filtered.len()
    }

    fn recount(&mut self) {
        self.selected_count = self.records.iter().filter(|record| record.selected).count();
    }
}
