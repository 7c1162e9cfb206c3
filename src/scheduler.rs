//! Delayed, cancellable tasks for a single-threaded event loop.
//!
//! Nothing here sleeps or spawns: the owner advances the clock and drains the
//! tasks that have fallen due. Every task is tagged with the session that
//! scheduled it so a restart can drop everything belonging to the old one.

use std::time::Duration;

use crate::game::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// A task that has fallen due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Due<T> {
    pub id: TaskId,
    pub due: Duration,
    pub session: SessionId,
    pub task: T,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    id: TaskId,
    due: Duration,
    session: SessionId,
    task: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    pending: Vec<Entry<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Scheduler {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Current clock reading. While draining, this is the due time of the
    /// task being run, so follow-up work is scheduled without drift.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Run `task` `delay` after the current clock reading.
    pub fn schedule(&mut self, delay: Duration, session: SessionId, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Entry {
            id,
            due: self.now + delay,
            session,
            task,
        });
        id
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|e| e.id == id)
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|e| e.id != id);
        self.pending.len() != before
    }

    /// Drop every task scheduled by `session`. Returns how many were removed.
    pub fn cancel_session(&mut self, session: SessionId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|e| e.session != session);
        before - self.pending.len()
    }

    /// Pop the earliest task due at or before `until`, moving the clock to its
    /// due time. Ties run in scheduling order. Once nothing is left, the clock
    /// settles at `until`. The clock never moves backwards.
    pub fn pop_due(&mut self, until: Duration) -> Option<Due<T>> {
        let position = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.id))
            .map(|(i, _)| i);

        match position {
            Some(i) => {
                let entry = self.pending.swap_remove(i);
                self.now = self.now.max(entry.due);
                Some(Due {
                    id: entry.id,
                    due: entry.due,
                    session: entry.session,
                    task: entry.task,
                })
            }
            None => {
                self.now = self.now.max(until);
                None
            }
        }
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
