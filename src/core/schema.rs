//! HarnessRecord schema v1 - canonical schema for all harness outputs.

use serde::{Deserialize, Serialize};

use super::env::EnvironmentInfo;
use super::stats::LatencyStats;

/// Schema version for forward compatibility
pub const SCHEMA_VERSION: u32 = 1;

/// Iteration counts used for a recorded scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunParams {
    pub warmup_iterations: u32,
    pub measured_iterations: u32,
}

impl Default for RunParams {
    fn default() -> Self {
        RunParams {
            warmup_iterations: 0,
            measured_iterations: 1,
        }
    }
}

/// Canonical harness record - the unified output schema for run and bench
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessRecord {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// Unique identifier for this record
    pub record_id: String,

    /// ISO 8601 timestamp
    pub timestamp: String,

    /// Scenario name ("run", "bench", or a custom label)
    pub scenario: String,

    /// Simulated driver version the scenario ran against
    pub driver_version: String,

    /// Final scenario status ("initialized", "ok", ...)
    pub status: String,

    /// Environment information (CPU, OS, git, etc.)
    pub env: EnvironmentInfo,

    /// Iteration counts
    pub params: RunParams,

    // --- Driver state ---
    /// Memory counter when the scenario finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_allocated_bytes: Option<u64>,

    /// Simulated temperature readout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<u32>,

    // --- Compute results ---
    /// Workload size passed to the compute path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workload_size: Option<i64>,

    /// Result of the simulated compute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_result: Option<i64>,

    /// Latency statistics over measured iterations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_stats: Option<LatencyStats>,

    // --- CLI context ---
    /// Command line arguments used
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cli_args: Vec<String>,
}

impl HarnessRecord {
    /// Create a new HarnessRecord with required fields
    pub fn new(
        scenario: String,
        driver_version: String,
        env: EnvironmentInfo,
        params: RunParams,
    ) -> Self {
        // Record ID from wall-clock nanos + compacted timestamp
        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let compact = timestamp.get(..19).unwrap_or("").replace([':', '-', 'T'], "");
        let record_id = format!("{:x}-{}", nanos, compact);

        HarnessRecord {
            schema_version: SCHEMA_VERSION,
            record_id,
            timestamp,
            scenario,
            driver_version,
            status: String::new(),
            env,
            params,
            memory_allocated_bytes: None,
            temperature_c: None,
            workload_size: None,
            compute_result: None,
            latency_stats: None,
            cli_args: Vec::new(),
        }
    }
}
