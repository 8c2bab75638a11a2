//! Presentation surface the renderer and the popup controller draw into
//!
//! Implementations map these calls onto whatever the host offers (DOM, a
//! terminal, a test recorder). The core never inspects the surface back
//! except for the viewport height.

use crate::list::SelectionSummary;
use crate::render::view::{EmptyState, ItemView};
use crate::render::window::Window;
use crate::status::{PopupStatus, Toast};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Live UI binding; the listener is released when this is dropped.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

pub trait Surface {
    /// Height of the scrollable list area in pixels.
    fn viewport_height(&self) -> u32;

    fn show_empty(&mut self, state: &EmptyState, message: &str);

    /// Replace the whole list with `items` in one step.
    fn attach_items(&mut self, items: Vec<ItemView>);

    /// Replace the rendered window of a long list.
    fn show_window(&mut self, window: Window, items: Vec<ItemView>);

    /// Redraw one already-rendered item in place.
    fn update_item(&mut self, item: ItemView);

    fn focus_item(&mut self, record_index: usize);

    /// Start delivering scroll offsets to the renderer.
    fn bind_scroll(&mut self) -> Subscription;

    fn show_summary(&mut self, summary: &SelectionSummary);

    /// Header label naming the domain being inspected.
    fn show_domain(&mut self, label: &str);

    fn show_status(&mut self, status: &PopupStatus);

    fn show_toast(&mut self, toast: &Toast);
}

/// What the list area currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListContent {
    #[default]
    Blank,
    Empty(String),
    Items(Vec<ItemView>),
    Window(Window, Vec<ItemView>),
}

/// Surface that remembers the last state of everything drawn.
///
/// Used by the terminal harness to print results and by tests to assert on
/// the visible state.
#[derive(Debug)]
pub struct RecordingSurface {
    pub viewport_height: u32,
    pub content: ListContent,
    pub status: Option<PopupStatus>,
    pub summary: Option<SelectionSummary>,
    pub domain_label: Option<String>,
    pub toasts: Vec<Toast>,
    pub focused: Option<usize>,
    /// Number of full-list attaches and window redraws
    pub draws: usize,
    active_bindings: Arc<AtomicUsize>,
}

impl RecordingSurface {
    pub fn new(viewport_height: u32) -> Self {
        Self {
            viewport_height,
            content: ListContent::Blank,
            status: None,
            summary: None,
            domain_label: None,
            toasts: Vec::new(),
            focused: None,
            draws: 0,
            active_bindings: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn active_bindings(&self) -> usize {
        self.active_bindings.load(Ordering::SeqCst)
    }

    pub fn items(&self) -> &[ItemView] {
        match &self.content {
            ListContent::Items(items) | ListContent::Window(_, items) => items,
            _ => &[],
        }
    }

    pub fn last_toast(&self) -> Option<&Toast> {
        self.toasts.last()
    }
}

impl Surface for RecordingSurface {
    fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    fn show_empty(&mut self, _state: &EmptyState, message: &str) {
        self.content = ListContent::Empty(message.to_string());
    }

    fn attach_items(&mut self, items: Vec<ItemView>) {
        self.draws += 1;
        self.content = ListContent::Items(items);
    }

    fn show_window(&mut self, window: Window, items: Vec<ItemView>) {
        self.draws += 1;
        self.content = ListContent::Window(window, items);
    }

    fn update_item(&mut self, item: ItemView) {
        let items = match &mut self.content {
            ListContent::Items(items) | ListContent::Window(_, items) => items,
            _ => return,
        };
        if let Some(slot) = items.iter_mut().find(|i| i.record_index == item.record_index) {
            *slot = item;
        }
    }

    fn focus_item(&mut self, record_index: usize) {
        self.focused = Some(record_index);
    }

    fn bind_scroll(&mut self) -> Subscription {
        let counter = self.active_bindings.clone();
        counter.fetch_add(1, Ordering::SeqCst);
        Subscription::new(move || {
            counter.fetch_sub(1, Ordering::SeqCst);
        })
    }

    fn show_summary(&mut self, summary: &SelectionSummary) {
        self.summary = Some(summary.clone());
    }

    fn show_domain(&mut self, label: &str) {
        self.domain_label = Some(label.to_string());
    }

    fn show_status(&mut self, status: &PopupStatus) {
        self.status = Some(status.clone());
    }

    fn show_toast(&mut self, toast: &Toast) {
        self.toasts.push(toast.clone());
    }
}
