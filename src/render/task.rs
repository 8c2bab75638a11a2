//! Cancellable render work with at most one task in flight

use crate::render::view::ItemView;
use log::trace;

/// Work a render pass still has to do
#[derive(Debug)]
pub enum Stage {
    /// Show the empty-state message
    Empty,
    /// Build `len` items `batch` at a time, attach when complete
    Batched {
        len: usize,
        next: usize,
        built: Vec<ItemView>,
    },
    /// Materialise the viewport window of a `len`-item list
    Windowed { len: usize },
}

#[derive(Debug)]
pub struct RenderTask {
    pub id: u64,
    pub stage: Stage,
}

/// Holds the single in-flight [`RenderTask`].
///
/// Starting a task drops the previous one, so work scheduled for it can
/// never reach the surface.
#[derive(Debug, Default)]
pub struct TaskSlot {
    next_id: u64,
    current: Option<RenderTask>,
}

impl TaskSlot {
    pub fn start(&mut self, stage: Stage) -> u64 {
        self.cancel();
        self.next_id += 1;
        self.current = Some(RenderTask {
            id: self.next_id,
            stage,
        });
        self.next_id
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.current.take() {
            trace!("Cancelled render task {}", task.id);
        }
    }

    pub fn take(&mut self) -> Option<RenderTask> {
        self.current.take()
    }

    /// Put an unfinished task back unless a newer one started meanwhile.
    pub fn resume(&mut self, task: RenderTask) {
        if self.current.is_none() && task.id == self.next_id {
            self.current = Some(task);
        }
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn current_id(&self) -> Option<u64> {
        self.current.as_ref().map(|task| task.id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Stage, TaskSlot};

    #[test]
    fn starting_a_task_replaces_the_previous_one() {
        let mut slot = TaskSlot::default();
        let first = slot.start(Stage::Empty);
        let second = slot.start(Stage::Windowed { len: 80 });
        assert_ne!(first, second);
        assert_eq!(slot.current_id(), Some(second));
    }

    #[test]
    fn stale_task_cannot_be_resumed() {
        let mut slot = TaskSlot::default();
        slot.start(Stage::Empty);
        let stale = slot.take().expect("task");
        slot.start(Stage::Empty);
        let newer = slot.current_id();
        slot.take();
        slot.resume(stale);
        assert!(slot.is_idle());
        assert_ne!(newer, None);
    }

    #[test]
    fn resume_keeps_the_current_task() {
        let mut slot = TaskSlot::default();
        let id = slot.start(Stage::Windowed { len: 60 });
        let task = slot.take().expect("task");
        slot.resume(task);
        assert_eq!(slot.current_id(), Some(id));
    }
}
