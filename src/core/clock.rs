//! Injectable time source.
//!
//! Every simulated delay and latency measurement goes through `Clock`, so
//! tests can drive the harness on virtual time instead of sleeping for real.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic time source used for simulated delays and latency measurement.
pub trait Clock: Send + Sync {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
    /// Block for `duration` (virtual clocks advance instead of blocking).
    fn sleep(&self, duration: Duration);
}

/// Wall-clock implementation backed by `Instant` and `thread::sleep`.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock for tests. Time is a micros counter; `sleep` adds to it
/// without blocking, so a shared handle observes exactly the slept total.
#[derive(Default)]
pub struct MockClock {
    elapsed_us: AtomicU64,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance virtual time without a sleep call.
    pub fn advance(&self, duration: Duration) {
        self.elapsed_us
            .fetch_add(duration.as_micros() as u64, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now(&self) -> Duration {
        Duration::from_micros(self.elapsed_us.load(Ordering::SeqCst))
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_clock_advances_by_slept_duration() {
        let clock = MockClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        clock.sleep(Duration::from_millis(77));
        assert_eq!(clock.now(), Duration::from_millis(77));
        clock.advance(Duration::from_micros(500));
        assert_eq!(clock.now(), Duration::from_micros(77_500));
    }

    #[test]
    fn system_clock_sleep_blocks_at_least_duration() {
        let clock = SystemClock::new();
        let before = clock.now();
        clock.sleep(Duration::from_millis(5));
        assert!(clock.now() - before >= Duration::from_millis(5));
    }
}
