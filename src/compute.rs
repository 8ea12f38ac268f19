//! Stateless compute-path simulation: jittered workloads and their timing.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::core::clock::Clock;

/// Jittered delay bounds for a simulated workload, in microseconds.
/// The upper bound is exclusive.
const WORKLOAD_DELAY_MIN_US: u64 = 50_000;
const WORKLOAD_DELAY_MAX_US: u64 = 100_000;

/// Result and measured latency of one benchmarked workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkOutput {
    pub result: i64,
    pub latency: Duration,
}

/// Simulate one workload: sleep a random duration in [50ms, 100ms), then
/// return `size * 2`, saturating at the `i64` bounds. `size` is not
/// validated; zero and negative sizes go through the same transform.
pub fn run_workload(clock: &dyn Clock, size: i64) -> i64 {
    let delay_us = rand::thread_rng().gen_range(WORKLOAD_DELAY_MIN_US..WORKLOAD_DELAY_MAX_US);
    clock.sleep(Duration::from_micros(delay_us));
    debug!(size, delay_us, "workload complete");
    size.saturating_mul(2)
}

/// Run one workload and measure its latency through the clock.
///
/// With a mock clock the latency is exactly the drawn sleep; with the system
/// clock it is wall time and includes scheduling jitter.
pub fn benchmark_compute(clock: &dyn Clock, size: i64) -> BenchmarkOutput {
    let start = clock.now();
    let result = run_workload(clock, size);
    let latency = clock.now() - start;
    BenchmarkOutput { result, latency }
}
