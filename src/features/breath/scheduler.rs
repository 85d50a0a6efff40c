//! Frame requests and cancellable delayed tasks.
//!
//! Stands in for a display-refresh callback plus a timer wheel. The host
//! loop asks for due work each iteration; nothing runs on its own thread.

use std::collections::BTreeMap;

use super::clock::Timestamp;

/// Handle for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

/// Frame requests plus a queue of delayed tasks of type `T`.
///
/// At most one frame is ever pending. Tasks come back from
/// [`Scheduler::drain_due`] ordered by due time, ties in insertion order.
#[derive(Debug)]
pub struct Scheduler<T> {
    frame_pending: bool,
    next_id: u64,
    tasks: BTreeMap<(Timestamp, TaskId), T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frame_pending: false,
            next_id: 0,
            tasks: BTreeMap::new(),
        }
    }

    /// Ask for a frame. Requesting while one is pending keeps the single request.
    pub fn request_frame(&mut self) {
        self.frame_pending = true;
    }

    /// Withdraw the pending frame, if any.
    pub fn cancel_frame(&mut self) {
        self.frame_pending = false;
    }

    #[must_use]
    pub const fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Consume the pending frame. Returns false if none was pending.
    pub fn take_frame(&mut self) -> bool {
        std::mem::replace(&mut self.frame_pending, false)
    }

    /// Schedule `task` to become due `delay_ms` after `now`.
    pub fn schedule(&mut self, now: Timestamp, delay_ms: u64, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.insert((now.plus_millis(delay_ms), id), task);
        id
    }

    /// Cancel one task. Returns the task if it was still pending.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let key = self.tasks.keys().find(|(_, task_id)| *task_id == id).copied()?;
        self.tasks.remove(&key)
    }

    /// Cancel every pending task matching `pred`. Returns how many were dropped.
    pub fn cancel_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.tasks.len();
        self.tasks.retain(|_, task| !pred(task));
        before - self.tasks.len()
    }

    /// Remove and return every task due at or before `now`.
    pub fn drain_due(&mut self, now: Timestamp) -> Vec<T> {
        let later = self.tasks.split_off(&(now.plus_millis(1), TaskId(0)));
        let due = std::mem::replace(&mut self.tasks, later);
        due.into_values().collect()
    }

    /// When the earliest pending task falls due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.tasks.keys().next().map(|(due, _)| *due)
    }

    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// True when neither a frame nor any task is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.frame_pending && self.tasks.is_empty()
    }
}
