//! Injectable clock sources.
//!
//! The profiler never reads the system time directly. Every timestamp comes
//! from a [`Clock`] handed to it at construction, so tests can drive time by
//! hand with a [`ManualClock`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use time::OffsetDateTime;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Current date and time.
    fn now(&self) -> OffsetDateTime;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    #[inline]
    fn now(&self) -> OffsetDateTime {
        (**self).now()
    }
}

/// Wall clock anchored at creation and advanced by a monotonic [`Instant`].
///
/// Readings never go backwards, even if the system time is adjusted while the
/// process runs.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    anchor: OffsetDateTime,
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Create a clock anchored at the current UTC time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            anchor: OffsetDateTime::now_utc(),
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        self.anchor + self.origin.elapsed()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<OffsetDateTime>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    #[must_use]
    pub const fn new(start: OffsetDateTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }

    /// Jump to an arbitrary instant, including one in the past.
    pub fn set(&self, at: OffsetDateTime) {
        *self.now.lock() = at;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn manual_clock_is_frozen_until_advanced() {
        let clock = ManualClock::new(datetime!(2026-01-01 0:00 UTC));
        assert_eq!(clock.now(), clock.now());

        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now(), datetime!(2026-01-01 0:00:00.25 UTC));
    }

    #[test]
    fn manual_clock_can_move_backwards() {
        let clock = ManualClock::new(datetime!(2026-01-01 12:00 UTC));
        clock.set(datetime!(2026-01-01 11:00 UTC));
        assert_eq!(clock.now(), datetime!(2026-01-01 11:00 UTC));
    }

    #[test]
    fn shared_clock_reads_through_arc() {
        let clock = Arc::new(ManualClock::new(datetime!(2026-01-01 0:00 UTC)));
        let shared: Arc<dyn Clock> = Arc::new(Arc::clone(&clock));

        clock.advance(Duration::from_secs(3));
        assert_eq!(shared.now(), datetime!(2026-01-01 0:00:03 UTC));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now();
        std::thread::sleep(Duration::from_millis(1));
        assert!(clock.now() > first);
    }
}
