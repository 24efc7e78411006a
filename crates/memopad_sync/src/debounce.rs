//! Single-slot debounce timer for autosave.

use std::time::{Duration, Instant};

/// A cancellable single-slot timer.
///
/// At most one deadline is pending at a time: each call to
/// [`Debounce::schedule`] replaces any pending deadline, collapsing a burst
/// of edits into a single expiry one interval after the last one. The host
/// drives expiry by polling [`Debounce::fire_if_due`] from its event loop.
#[derive(Debug)]
pub struct Debounce {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    /// Creates a debounce timer with the given quiet interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Schedules (or reschedules) the deadline at `now + interval`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    /// Cancels any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns the pending deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consumes the deadline if it has passed.
    ///
    /// Returns true exactly once per elapsed deadline.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
