//! # Throttle
//!
//! Leading-edge throttle: the first input passes immediately, later inputs
//! pass only once `delay` has elapsed since the last one that passed.
//! Inputs inside the window are dropped.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Throttled<T> {
    delay: Duration,
    value: T,
    last_emit: Option<Instant>,
}

impl<T: Clone> Throttled<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            value: initial,
            last_emit: None,
        }
    }

    /// Offer a value; returns it when it passes the throttle.
    pub fn set(&mut self, value: T, now: Instant) -> Option<T> {
        let open = self
            .last_emit
            .map(|at| now.saturating_duration_since(at) >= self.delay)
            .unwrap_or(true);
        if !open {
            return None;
        }
        self.value = value;
        self.last_emit = Some(now);
        Some(self.value.clone())
    }

    /// Last value that passed
    pub fn value(&self) -> &T {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_most_one_emission_per_window() {
        let start = Instant::now();
        let delay = Duration::from_millis(1000);
        let mut throttled = Throttled::new(0, delay);

        assert_eq!(throttled.set(1, start), Some(1));
        assert_eq!(throttled.set(2, start + Duration::from_millis(400)), None);
        assert_eq!(throttled.set(3, start + Duration::from_millis(999)), None);
        assert_eq!(*throttled.value(), 1);
        assert_eq!(throttled.set(4, start + delay), Some(4));
        assert_eq!(throttled.set(5, start + Duration::from_millis(1500)), None);
    }
}
