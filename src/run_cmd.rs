use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::config::HarnessConfig;
use crate::core::env::EnvironmentInfo;
use crate::core::schema::{HarnessRecord, RunParams};
use crate::driver::GpuDriver;
use crate::storage::JsonlWriter;
use crate::{HarnessError, HarnessResult};

const DEFAULT_ALLOCATE_BYTES: u64 = 512;
const DEFAULT_WORKLOAD_SIZE: i64 = 100;
const DEFAULT_RELEASE_BYTES: u64 = 256;

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> HarnessResult<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| HarnessError::Message(e.to_string()))?;
    }
    let json = serde_json::to_vec_pretty(value).map_err(|e| HarnessError::Message(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| HarnessError::Message(e.to_string()))
}

/// Exercise the full driver lifecycle: initialize, allocate, dispatch a
/// compute job, read the temperature, release. Defaults reproduce the
/// canonical CI scenario.
pub fn run(
    driver_version: Option<String>,
    allocate: Option<u64>,
    workload_size: Option<i64>,
    release: Option<u64>,
    config_path: Option<PathBuf>,
    json_out: Option<PathBuf>,
    record_out: Option<PathBuf>,
) -> HarnessResult<()> {
    let config = HarnessConfig::resolve(config_path.as_deref())?;

    let mut settings = config.driver.clone();
    if driver_version.is_some() {
        settings.version = driver_version;
    }
    let mut driver = GpuDriver::from_settings(&settings);

    let allocate = allocate.unwrap_or(DEFAULT_ALLOCATE_BYTES);
    let workload_size = workload_size
        .or(config.bench.workload_size)
        .unwrap_or(DEFAULT_WORKLOAD_SIZE);
    let release = release.unwrap_or(DEFAULT_RELEASE_BYTES);

    info!(version = %driver.version(), "initializing driver");
    let message = driver.initialize();
    info!("{message}");

    let total = driver.allocate_memory(allocate)?;
    info!(total, "memory allocated");

    let result = driver.run_compute(workload_size)?;
    let temperature = driver.temperature();
    let remaining = driver.release_memory(release);

    let mut record = HarnessRecord::new(
        "run".to_string(),
        driver.version().to_string(),
        EnvironmentInfo::detect(),
        RunParams::default(),
    );
    record.status = driver.status().to_string();
    record.memory_allocated_bytes = Some(remaining);
    record.temperature_c = Some(temperature);
    record.workload_size = Some(workload_size);
    record.compute_result = Some(result);
    record.cli_args = std::env::args().collect();

    if let Some(json_path) = json_out {
        write_json(&json_path, &record)?;
    }
    if let Some(record_path) = record_out {
        JsonlWriter::new(&record_path).append(&record)?;
        info!(path = %record_path.display(), "record appended");
    }

    println!(
        "run: driver={} status={} mem={}B temp={}C compute={}",
        driver.version(),
        driver.status(),
        remaining,
        temperature,
        result
    );

    Ok(())
}
