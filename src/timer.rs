//! Host-polled timers.
//!
//! Nothing here sleeps or spawns. Timers are deadlines; the host asks for
//! the earliest one to know how long it may wait, then polls with the
//! current instant.

use std::time::{Duration, Instant};

/// A single-slot timer that restarts on every trigger.
///
/// Triggering while armed replaces the old deadline, so a burst of triggers
/// fires exactly once, one quiet period after the last of them.
#[derive(Debug, Clone)]
pub struct Debounce {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the timer from `now`.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Returns `true` once when the deadline has passed, then disarms.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/// Fire-and-forget deferred actions.
///
/// Entries come back from [`Timeline::drain_due`] ordered by deadline, ties
/// in scheduling order. There is no way to cancel a single entry.
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    entries: Vec<(Instant, u64, T)>,
    next_seq: u64,
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// Run `action` once `delay` has elapsed after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, action: T) {
        self.entries.push((now + delay, self.next_seq, action));
        self.next_seq += 1;
    }

    /// Remove and return every action due at `now`.
    pub fn drain_due(&mut self, now: Instant) -> Vec<T> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].0 <= now {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|&(at, seq, _)| (at, seq));
        due.into_iter().map(|(_, _, action)| action).collect()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|&(at, _, _)| at).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}
