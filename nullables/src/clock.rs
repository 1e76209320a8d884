//! Nullable clock: deterministic time for testing.

use cohort_types::Timestamp;
use std::cell::Cell;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(initial_secs),
        }
    }

    /// Get the current time.
    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get().saturating_add(secs));
    }

    /// Advance time by whole hours.
    pub fn advance_hours(&self, hours: u64) {
        self.advance(hours.saturating_mul(3600));
    }

    /// Set the time to a specific value.
    pub fn set(&self, secs: u64) {
        self.current.set(secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_moves_when_told() {
        let clock = NullClock::new(1_000);
        assert_eq!(clock.now(), Timestamp::new(1_000));
        clock.advance(30);
        assert_eq!(clock.now(), Timestamp::new(1_030));
        clock.advance_hours(2);
        assert_eq!(clock.now(), Timestamp::new(8_230));
        clock.set(5);
        assert_eq!(clock.now(), Timestamp::new(5));
    }

    #[test]
    fn advance_saturates() {
        let clock = NullClock::new(u64::MAX - 1);
        clock.advance(10);
        assert_eq!(clock.now(), Timestamp::new(u64::MAX));
    }
}
