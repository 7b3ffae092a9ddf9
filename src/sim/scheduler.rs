//! Per-frame task queue with cancellation tokens
//!
//! The host calls into the simulation once per display frame. Work that must
//! happen "next frame" is scheduled here and addressed by a [`TaskId`], so a
//! pending task can be cancelled before it fires.

/// Cancellation token for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// FIFO of tasks waiting for the next frame
#[derive(Debug, Clone)]
pub struct FrameScheduler<T> {
    pending: Vec<(TaskId, T)>,
    next_id: u64,
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameScheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Queue `task` for the next frame
    pub fn schedule(&mut self, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push((id, task));
        id
    }

    /// Drop a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.pending.iter().position(|(pid, _)| *pid == id) {
            Some(idx) => {
                self.pending.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Tokens of every task due this frame, in schedule order
    ///
    /// Tasks scheduled after this call belong to the following frame.
    pub fn due(&self) -> Vec<TaskId> {
        self.pending.iter().map(|(id, _)| *id).collect()
    }

    /// Remove a due task so it can run. `None` if it was cancelled meanwhile.
    pub fn take(&mut self, id: TaskId) -> Option<T> {
        let idx = self.pending.iter().position(|(pid, _)| *pid == id)?;
        Some(self.pending.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
