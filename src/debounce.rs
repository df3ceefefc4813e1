//! "Last write wins" delay for search input.
//!
//! Typing into the search box pushes the current text; the filter runs only
//! once the input has been quiet for the delay (300 ms by default). Each push
//! replaces the pending value and restarts the delay, so only the most recent
//! text can ever be delivered.
//!
//! Time is passed in rather than read from a clock, which keeps the caller in
//! charge of scheduling and makes the behavior deterministic.

use std::time::{Duration, Instant};

/// Default quiet period before a search is applied.
pub const SEARCH_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value and restart the delay from `now`.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// When the pending value becomes due, if any.
    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its delay has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.due_at().is_some_and(|due| due <= now) {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Drop the pending value without delivering it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DELAY)
    }
}
