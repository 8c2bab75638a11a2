//! Viewport window math for long lists

use std::ops::Range;

/// Slice of the filtered view that is materialised for the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
    /// Translation of the first rendered item
    pub offset_px: u64,
    /// Height of the scroll area as if every item were rendered
    pub total_height_px: u64,
}

impl Window {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn contains(&self, position: usize) -> bool {
        self.range().contains(&position)
    }
}

/// Items visible at `scroll_top` plus `buffer` items on each side.
pub fn compute_window(
    len: usize,
    scroll_top: u32,
    viewport_height: u32,
    item_height: u32,
    buffer: usize,
) -> Window {
    let item_height = item_height.max(1);
    let visible = viewport_height.div_ceil(item_height) as usize;
    let first_visible = (scroll_top / item_height) as usize;

    let start = first_visible.saturating_sub(buffer).min(len);
    let end = (start + visible + buffer * 2).min(len);

    Window {
        start,
        end,
        offset_px: start as u64 * item_height as u64,
        total_height_px: len as u64 * item_height as u64,
    }
}

/// Scroll offset that brings `position` into a viewport at `scroll_top`,
/// or `None` when it is already fully visible.
pub fn scroll_into_view(
    position: usize,
    scroll_top: u32,
    viewport_height: u32,
    item_height: u32,
) -> Option<u32> {
    let top = position as u64 * item_height as u64;
    let bottom = top + item_height as u64;
    let view_top = scroll_top as u64;
    let view_bottom = view_top + viewport_height as u64;

    if top < view_top {
        Some(top as u32)
    } else if bottom > view_bottom {
        Some(bottom.saturating_sub(viewport_height as u64) as u32)
    } else {
        None
    }
}
