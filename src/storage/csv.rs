//! CSV export for harness records.

use std::io::Write;
use std::path::Path;

use crate::HarnessError;
use crate::core::schema::HarnessRecord;

/// CSV column headers in deterministic order.
pub const CSV_HEADERS: &[&str] = &[
    "schema_version",
    "record_id",
    "timestamp",
    "scenario",
    "driver_version",
    "status",
    "os",
    "arch",
    "git_sha",
    "warmup",
    "iterations",
    "memory_allocated_bytes",
    "temperature_c",
    "workload_size",
    "compute_result",
    "latency_mean_ms",
    "latency_median_ms",
    "latency_stddev_ms",
    "latency_min_ms",
    "latency_max_ms",
    "latency_p95_ms",
];

/// Flattens `HarnessRecord` data into CSV rows with a deterministic column
/// order, for spreadsheet-style comparison across CI runs.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        CsvExporter
    }

    /// Export records to a CSV file, creating parent directories as needed.
    pub fn export(&self, records: &[HarnessRecord], output: &Path) -> Result<(), HarnessError> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| HarnessError::Message(format!("failed to create directory: {e}")))?;
            }
        }

        let file = std::fs::File::create(output)
            .map_err(|e| HarnessError::Message(format!("failed to create file: {e}")))?;

        self.export_to_writer(records, file)
    }

    /// Export records to stdout.
    pub fn export_to_stdout(&self, records: &[HarnessRecord]) -> Result<(), HarnessError> {
        let stdout = std::io::stdout();
        let handle = stdout.lock();
        self.export_to_writer(records, handle)
    }

    /// Export records to any writer implementing `Write`.
    pub fn export_to_writer<W: Write>(
        &self,
        records: &[HarnessRecord],
        writer: W,
    ) -> Result<(), HarnessError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(CSV_HEADERS)
            .map_err(|e| HarnessError::Message(format!("failed to write CSV headers: {e}")))?;

        for record in records {
            let row = self.record_to_row(record);
            csv_writer
                .write_record(&row)
                .map_err(|e| HarnessError::Message(format!("failed to write CSV row: {e}")))?;
        }

        csv_writer
            .flush()
            .map_err(|e| HarnessError::Message(format!("failed to flush CSV writer: {e}")))?;

        Ok(())
    }

    /// Convert a record to one row of CSV values; absent fields become "".
    fn record_to_row(&self, record: &HarnessRecord) -> Vec<String> {
        let stats = record.latency_stats.as_ref();
        vec![
            record.schema_version.to_string(),
            record.record_id.clone(),
            record.timestamp.clone(),
            record.scenario.clone(),
            record.driver_version.clone(),
            record.status.clone(),
            record.env.os.clone(),
            record.env.arch.clone(),
            record.env.git_sha.clone().unwrap_or_default(),
            record.params.warmup_iterations.to_string(),
            record.params.measured_iterations.to_string(),
            record
                .memory_allocated_bytes
                .map(|v| v.to_string())
                .unwrap_or_default(),
            record
                .temperature_c
                .map(|v| v.to_string())
                .unwrap_or_default(),
            record
                .workload_size
                .map(|v| v.to_string())
                .unwrap_or_default(),
            record
                .compute_result
                .map(|v| v.to_string())
                .unwrap_or_default(),
            stats
                .map(|s| format!("{:.3}", s.mean_ms))
                .unwrap_or_default(),
            stats
                .and_then(|s| s.median_ms)
                .map(|v| format!("{:.3}", v))
                .unwrap_or_default(),
            stats
                .and_then(|s| s.stddev_ms)
                .map(|v| format!("{:.3}", v))
                .unwrap_or_default(),
            stats
                .map(|s| format!("{:.3}", s.min_ms))
                .unwrap_or_default(),
            stats
                .map(|s| format!("{:.3}", s.max_ms))
                .unwrap_or_default(),
            stats
                .and_then(|s| s.p95_ms)
                .map(|v| format!("{:.3}", v))
                .unwrap_or_default(),
        ]
    }
}
