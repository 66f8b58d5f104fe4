//! Deterministic timer queue.
//!
//! Time is a `Duration` measured from an arbitrary origin (usually the moment
//! the card opened). Nothing here reads a clock: callers pass `now` in, which
//! lets tests step through an animation window without sleeping.

use std::time::Duration;

/// Handle returned by [`Scheduler::schedule`], used to cancel a pending task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Entry<T> {
    deadline: Duration,
    handle: TimerHandle,
    task: T,
}

/// Ordered queue of tasks waiting for a deadline.
///
/// Tasks with equal deadlines fire in scheduling order.
#[derive(Debug)]
pub struct Scheduler<T> {
    next: u64,
    // Sorted by (deadline, handle).
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next: 0,
            entries: Vec::new(),
        }
    }

    /// Schedules `task` to become due at `deadline`.
    pub fn schedule(&mut self, deadline: Duration, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next);
        self.next = self.next.wrapping_add(1);

        let pos = self
            .entries
            .partition_point(|e| (e.deadline, e.handle.0) <= (deadline, handle.0));
        self.entries.insert(
            pos,
            Entry {
                deadline,
                handle,
                task,
            },
        );
        handle
    }

    /// Removes a pending task. Returns it if it had not fired yet.
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<T> {
        let pos = self.entries.iter().position(|e| e.handle == handle)?;
        Some(self.entries.remove(pos).task)
    }

    /// Pops the earliest task whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<T> {
        if self.entries.first()?.deadline <= now {
            Some(self.entries.remove(0).task)
        } else {
            None
        }
    }

    /// Deadline of the earliest pending task.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.first().map(|e| e.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_tasks_fire_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(650), "settle");
        s.schedule(ms(600), "flip");

        assert_eq!(s.pop_due(ms(599)), None);
        assert_eq!(s.pop_due(ms(700)), Some("flip"));
        assert_eq!(s.pop_due(ms(700)), Some("settle"));
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn test_equal_deadlines_keep_insertion_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(10), 1);
        s.schedule(ms(10), 2);
        s.schedule(ms(10), 3);

        let fired: Vec<_> = std::iter::from_fn(|| s.pop_due(ms(10))).collect();
        assert_eq!(fired, vec![1, 2, 3]);
    }

    #[test]
    fn test_cancel_removes_pending_task() {
        let mut s = Scheduler::new();
        let keep = s.schedule(ms(5), "keep");
        let drop = s.schedule(ms(1), "drop");

        assert_eq!(s.cancel(drop), Some("drop"));
        assert_eq!(s.cancel(drop), None);
        assert_eq!(s.next_deadline(), Some(ms(5)));
        assert_eq!(s.pop_due(ms(5)), Some("keep"));
        assert_eq!(s.cancel(keep), None);
    }
}
