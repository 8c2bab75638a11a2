//! List rendering
//!
//! The renderer projects the filtered view of a [`ListState`] onto a
//! [`Surface`]. Work is split into frames: the host calls [`Renderer::tick`]
//! once per animation frame and the renderer advances its single in-flight
//! [`task::RenderTask`] by one step.
//!
//! Short lists (up to the virtualize threshold) are built a batch per frame
//! and attached in one go once complete. Longer lists only materialise the
//! items around the viewport; scroll offsets reported between two frames
//! collapse into one window update on the next frame.

use crate::config::ViewConfig;
use crate::i18n;
use crate::list::ListState;
use crate::surface::{Subscription, Surface};
use log::debug;

pub mod task;
pub mod view;
pub mod window;

use task::{Stage, TaskSlot};
use view::{
    build_item, build_items, choose_strategy, EmptyState, ItemView, RenderStrategy, ViewState,
};
use window::{compute_window, scroll_into_view, Window};

/// Keys an item reacts to while focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKey {
    Enter,
    Space,
    /// Space with Ctrl or Cmd held
    ModifiedSpace,
    ArrowDown,
    ArrowUp,
}

/// Pointer targets inside an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Checkbox,
    Row,
    ExpandIcon,
}

/// User input on one item, from either keyboard or pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemInput {
    Key(ItemKey),
    Pointer(PointerTarget),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    Next,
    Previous,
}

/// What an input does, independent of how it arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    ToggleSelection,
    ToggleExpanded,
    MoveFocus(FocusMove),
}

impl ItemInput {
    pub fn action(self) -> ItemAction {
        match self {
            ItemInput::Key(ItemKey::ModifiedSpace) | ItemInput::Pointer(PointerTarget::Checkbox) => {
                ItemAction::ToggleSelection
            }
            ItemInput::Key(ItemKey::Enter | ItemKey::Space)
            | ItemInput::Pointer(PointerTarget::Row | PointerTarget::ExpandIcon) => {
                ItemAction::ToggleExpanded
            }
            ItemInput::Key(ItemKey::ArrowDown) => ItemAction::MoveFocus(FocusMove::Next),
            ItemInput::Key(ItemKey::ArrowUp) => ItemAction::MoveFocus(FocusMove::Previous),
        }
    }
}

#[derive(Debug)]
enum Mode {
    Idle,
    Empty,
    Standard,
    Windowed(WindowedView),
}

#[derive(Debug)]
struct WindowedView {
    len: usize,
    scroll_top: u32,
    pending_scroll: Option<u32>,
    window: Window,
    _binding: Subscription,
}

pub struct Renderer {
    config: ViewConfig,
    view: ViewState,
    tasks: TaskSlot,
    mode: Mode,
}

impl Renderer {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            view: ViewState::default(),
            tasks: TaskSlot::default(),
            mode: Mode::Idle,
        }
    }

    /// Schedule a render of the current filtered view.
    ///
    /// Any render still in flight is cancelled first.
    pub fn request(&mut self, list: &ListState) {
        let len = list.filtered_len();
        let stage = if len == 0 {
            Stage::Empty
        } else {
            match choose_strategy(len, self.config.virtualize_threshold) {
                RenderStrategy::Standard => Stage::Batched {
                    len,
                    next: 0,
                    built: Vec::with_capacity(len),
                },
                RenderStrategy::Windowed => Stage::Windowed { len },
            }
        };
        // Only a windowed pass inherits the scroll binding and offset.
        if !matches!(stage, Stage::Windowed { .. }) && matches!(self.mode, Mode::Windowed(_)) {
            self.mode = Mode::Idle;
        }
        let id = self.tasks.start(stage);
        debug!("Scheduled render task {} for {} cookies", id, len);
    }

    /// Forget per-item UI state, e.g. after the records were reloaded.
    pub fn reset(&mut self) {
        self.tasks.cancel();
        self.view = ViewState::default();
    }

    /// Run one animation frame of work. Returns whether more frames are needed.
    pub fn tick(&mut self, list: &ListState, surface: &mut dyn Surface) -> bool {
        if let Some(mut task) = self.tasks.take() {
            let finished = match &mut task.stage {
                Stage::Empty => {
                    self.finish_empty(list, surface);
                    true
                }
                Stage::Batched { len, next, built } => {
                    let end = (*next + self.config.batch_size.max(1)).min(*len);
                    built.extend(build_items(list, *next..end, &self.view, &self.config));
                    *next = end;
                    if end >= *len {
                        let items = std::mem::take(built);
                        self.finish_standard(list, items, surface);
                        true
                    } else {
                        false
                    }
                }
                Stage::Windowed { len } => {
                    let len = *len;
                    self.finish_windowed(list, len, surface);
                    true
                }
            };
            if !finished {
                self.tasks.resume(task);
            }
        }

        if let Mode::Windowed(windowed) = &mut self.mode {
            if let Some(scroll_top) = windowed.pending_scroll.take() {
                windowed.scroll_top = scroll_top;
                Self::redraw_window(&self.config, &self.view, windowed, list, surface);
            }
        }

        self.has_pending_work()
    }

    /// Record a scroll offset; applied on the next frame.
    pub fn on_scroll(&mut self, scroll_top: u32) {
        if let Mode::Windowed(windowed) = &mut self.mode {
            windowed.pending_scroll = Some(scroll_top);
        }
    }

    pub fn has_pending_work(&self) -> bool {
        if !self.tasks.is_idle() {
            return true;
        }
        matches!(&self.mode, Mode::Windowed(w) if w.pending_scroll.is_some())
    }

    pub fn strategy(&self) -> Option<RenderStrategy> {
        match self.mode {
            Mode::Standard => Some(RenderStrategy::Standard),
            Mode::Windowed(_) => Some(RenderStrategy::Windowed),
            Mode::Idle | Mode::Empty => None,
        }
    }

    pub fn window(&self) -> Option<Window> {
        match &self.mode {
            Mode::Windowed(windowed) => Some(windowed.window),
            _ => None,
        }
    }

    pub fn is_expanded(&self, list: &ListState, record_index: usize) -> bool {
        list.records()
            .get(record_index)
            .map_or(false, |record| self.view.expanded.contains(&record.dedup_key()))
    }

    /// Redraw one item if it is currently on screen.
    pub fn refresh_item(&self, list: &ListState, record_index: usize, surface: &mut dyn Surface) {
        let Some(position) = Self::position_of(list, record_index) else {
            return;
        };
        let on_screen = match &self.mode {
            Mode::Standard => true,
            Mode::Windowed(windowed) => windowed.window.contains(position),
            Mode::Idle | Mode::Empty => false,
        };
        if !on_screen {
            return;
        }
        if let Some(record) = list.records().get(record_index) {
            surface.update_item(build_item(
                record,
                record_index,
                position,
                list,
                &self.view,
                &self.config,
            ));
        }
    }

    /// Redraw every item currently on screen, e.g. after select-all.
    pub fn refresh_visible(&self, list: &ListState, surface: &mut dyn Surface) {
        let range = match &self.mode {
            Mode::Standard => 0..list.filtered_len(),
            Mode::Windowed(windowed) => windowed.window.range(),
            Mode::Idle | Mode::Empty => return,
        };
        for item in build_items(list, range, &self.view, &self.config) {
            surface.update_item(item);
        }
    }

    /// Expand or collapse the detail panel of an item.
    pub fn toggle_expanded(
        &mut self,
        list: &ListState,
        record_index: usize,
        surface: &mut dyn Surface,
    ) -> Option<bool> {
        let key = list.records().get(record_index)?.dedup_key();
        let expanded = if self.view.expanded.remove(&key) {
            false
        } else {
            self.view.expanded.insert(key);
            true
        };
        self.refresh_item(list, record_index, surface);
        Some(expanded)
    }

    /// Move focus to the adjacent item of the filtered view, wrapping at
    /// both ends. Scrolls a long list so the target is rendered.
    pub fn move_focus(
        &mut self,
        list: &ListState,
        from_record: usize,
        direction: FocusMove,
        surface: &mut dyn Surface,
    ) -> Option<usize> {
        let len = list.filtered_len();
        if len == 0 {
            return None;
        }
        let current = Self::position_of(list, from_record)?;
        let target = match direction {
            FocusMove::Next => (current + 1) % len,
            FocusMove::Previous => (current + len - 1) % len,
        };
        let target_record = list.filtered_indices()[target];

        if let Mode::Windowed(windowed) = &mut self.mode {
            let viewport = surface.viewport_height();
            if let Some(scroll_top) =
                scroll_into_view(target, windowed.scroll_top, viewport, self.config.item_height)
            {
                windowed.scroll_top = scroll_top;
                windowed.pending_scroll = None;
                Self::redraw_window(&self.config, &self.view, windowed, list, surface);
            }
        }

        surface.focus_item(target_record);
        Some(target_record)
    }

    fn finish_empty(&mut self, list: &ListState, surface: &mut dyn Surface) {
        let state = EmptyState::for_list(list).unwrap_or(EmptyState::NoCookies);
        surface.show_empty(&state, &i18n::empty_state_message(&state));
        self.mode = Mode::Empty;
    }

    fn finish_standard(
        &mut self,
        list: &ListState,
        mut items: Vec<ItemView>,
        surface: &mut dyn Surface,
    ) {
        // Selection may have changed while batches were being built.
        for item in &mut items {
            if let Some(record) = list.records().get(item.record_index) {
                item.selected = record.selected;
                item.expanded = self.view.expanded.contains(&record.dedup_key());
            }
        }
        debug!("Attaching {} rendered cookies", items.len());
        surface.attach_items(items);
        self.mode = Mode::Standard;
    }

    fn finish_windowed(&mut self, list: &ListState, len: usize, surface: &mut dyn Surface) {
        let previous = std::mem::replace(&mut self.mode, Mode::Idle);
        let (binding, scroll_top) = match previous {
            Mode::Windowed(old) => (old._binding, old.pending_scroll.unwrap_or(old.scroll_top)),
            _ => (surface.bind_scroll(), 0),
        };

        let viewport = surface.viewport_height();
        let max_scroll = (len as u64 * self.config.item_height as u64)
            .saturating_sub(viewport as u64)
            .min(u32::MAX as u64) as u32;

        let mut windowed = WindowedView {
            len,
            scroll_top: scroll_top.min(max_scroll),
            pending_scroll: None,
            window: compute_window(len, 0, viewport, self.config.item_height, 0),
            _binding: binding,
        };
        Self::redraw_window(&self.config, &self.view, &mut windowed, list, surface);
        self.mode = Mode::Windowed(windowed);
    }

    fn redraw_window(
        config: &ViewConfig,
        view: &ViewState,
        windowed: &mut WindowedView,
        list: &ListState,
        surface: &mut dyn Surface,
    ) {
        let window = compute_window(
            windowed.len,
            windowed.scroll_top,
            surface.viewport_height(),
            config.item_height,
            config.window_buffer,
        );
        windowed.window = window;
        surface.show_window(window, build_items(list, window.range(), view, config));
    }

    fn position_of(list: &ListState, record_index: usize) -> Option<usize> {
        list.filtered_indices()
            .iter()
            .position(|&index| index == record_index)
    }
}

#[cfg(test)]
mod tests;
