use std::path::{Path, PathBuf};

use tracing::info;

use crate::compute;
use crate::core::clock::SystemClock;
use crate::core::config::HarnessConfig;
use crate::core::env::{self, EnvironmentInfo};
use crate::core::schema::{HarnessRecord, RunParams};
use crate::core::stats::LatencyStats;
use crate::storage::JsonlWriter;
use crate::{HarnessError, HarnessResult};

const DEFAULT_ITERATIONS: usize = 3;
const DEFAULT_WARMUP: usize = 1;
const DEFAULT_WORKLOAD_SIZE: i64 = 100;

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> HarnessResult<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| HarnessError::Message(e.to_string()))?;
    }
    let json = serde_json::to_vec_pretty(value).map_err(|e| HarnessError::Message(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| HarnessError::Message(e.to_string()))
}

/// Benchmark the simulated compute path with warmup and measured iterations.
pub fn run(
    size: Option<i64>,
    iterations: Option<usize>,
    warmup: Option<usize>,
    config_path: Option<PathBuf>,
    json_out: Option<PathBuf>,
    record_out: Option<PathBuf>,
) -> HarnessResult<()> {
    let config = HarnessConfig::resolve(config_path.as_deref())?;

    let size = size
        .or(config.bench.workload_size)
        .unwrap_or(DEFAULT_WORKLOAD_SIZE);
    let iterations = iterations
        .or(config.bench.iterations)
        .unwrap_or(DEFAULT_ITERATIONS);
    let warmup = warmup.or(config.bench.warmup).unwrap_or(DEFAULT_WARMUP);

    if iterations == 0 {
        return Err(HarnessError::Message(
            "iterations must be at least 1".to_string(),
        ));
    }

    let clock = SystemClock::new();

    info!(size, iterations, warmup, "starting benchmark");
    for i in 0..warmup {
        info!(iteration = i + 1, "warmup");
        compute::run_workload(&clock, size);
    }

    let mut samples = Vec::with_capacity(iterations);
    let mut last_result = 0i64;
    for i in 0..iterations {
        let out = compute::benchmark_compute(&clock, size);
        info!(
            iteration = i + 1,
            latency_ms = out.latency.as_secs_f64() * 1000.0,
            "measured"
        );
        samples.push(out.latency);
        last_result = out.result;
    }

    let stats = LatencyStats::from_durations(&samples);
    let version = config
        .driver
        .version
        .clone()
        .unwrap_or_else(env::driver_version_from_env);

    let mut record = HarnessRecord::new(
        "bench".to_string(),
        version,
        EnvironmentInfo::detect(),
        RunParams {
            warmup_iterations: warmup as u32,
            measured_iterations: iterations as u32,
        },
    );
    record.status = "ok".to_string();
    record.workload_size = Some(size);
    record.compute_result = Some(last_result);
    record.latency_stats = Some(stats.clone());
    record.cli_args = std::env::args().collect();

    if let Some(json_path) = json_out {
        write_json(&json_path, &record)?;
    }
    if let Some(record_path) = record_out {
        JsonlWriter::new(&record_path).append(&record)?;
        info!(path = %record_path.display(), "record appended");
    }

    println!(
        "bench: size={} iterations={} mean={:.1}ms min={:.1}ms max={:.1}ms result={}",
        size, iterations, stats.mean_ms, stats.min_ms, stats.max_ms, last_result
    );

    Ok(())
}
