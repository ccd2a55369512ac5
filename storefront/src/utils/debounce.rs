//! # Debounce
//!
//! Trailing-edge debounce driven by explicit timestamps: a value is
//! emitted once no new input has arrived for `delay`.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debounced<T> {
    delay: Duration,
    latest: T,
    settled: T,
    last_input: Option<Instant>,
}

impl<T: Clone> Debounced<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            latest: initial.clone(),
            settled: initial,
            last_input: None,
        }
    }

    /// Record a new input; restarts the quiet period.
    pub fn set(&mut self, value: T, now: Instant) {
        self.latest = value;
        self.last_input = Some(now);
    }

    /// Emit the latest input if the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let since = self.last_input?;
        if now.saturating_duration_since(since) < self.delay {
            return None;
        }
        self.last_input = None;
        self.settled = self.latest.clone();
        Some(self.settled.clone())
    }

    /// Value as last typed
    pub fn latest(&self) -> &T {
        &self.latest
    }

    /// Value as last emitted
    pub fn settled(&self) -> &T {
        &self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.last_input.is_some()
    }

    /// Drop any pending emission and jump straight to `value`.
    pub fn reset(&mut self, value: T) {
        self.latest = value.clone();
        self.settled = value;
        self.last_input = None;
    }
}
