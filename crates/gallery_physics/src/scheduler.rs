//! Deferred tasks driven by the host tick loop
//!
//! Work scheduled "in N seconds" is queued here instead of on a detached
//! timer. The host advances the queue with each frame delta and executes
//! whatever comes due, so tearing a session down cancels everything still
//! pending.

use std::time::Duration;

/// Handle returned by [`DeferredQueue::schedule_after`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Pending<T> {
    handle: TaskHandle,
    due_at: Duration,
    task: T,
}

/// Queue of tasks that fire after a delay
#[derive(Debug)]
pub struct DeferredQueue<T> {
    now: Duration,
    next_handle: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeferredQueue<T> {
    /// Create an empty queue at time zero
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_handle: 0,
            pending: Vec::new(),
        }
    }

    /// Queue `task` to come due `delay` from now
    pub fn schedule_after(&mut self, delay: Duration, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Pending {
            handle,
            due_at: self.now + delay,
            task,
        });
        handle
    }

    /// Advance the clock and return the tasks that came due
    ///
    /// Tasks are returned in due order; ties keep scheduling order.
    pub fn advance(&mut self, delta: Duration) -> Vec<T> {
        self.now += delta;
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.due_at <= now);
        self.pending = waiting;
        due.sort_by_key(|p| (p.due_at, p.handle));
        due.into_iter().map(|p| p.task).collect()
    }

    /// Cancel one task; `false` if it already fired or was cancelled
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    /// Cancel everything and return how many tasks were dropped
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Number of tasks still waiting
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Time elapsed since the queue was created
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Time until the earliest pending task comes due
    pub fn time_until_next(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|p| p.due_at.saturating_sub(self.now))
            .min()
    }
}
