//! Run-subcommand smoke tests through the library API.

use std::path::{Path, PathBuf};

use tempfile::tempdir;

use gpu_harness::core::schema::HarnessRecord;
use gpu_harness::run_cmd;
use gpu_harness::storage::JsonlWriter;

fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("harness-config.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

fn read_report(path: &Path) -> HarnessRecord {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn run_smoke_writes_json_and_record_outputs() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "");
    let json_path = dir.path().join("report.json");
    let record_path = dir.path().join("records.jsonl");

    run_cmd::run(
        Some("2.0".to_string()),
        Some(128),
        Some(10),
        Some(64),
        Some(config),
        Some(json_path.clone()),
        Some(record_path.clone()),
    )
    .unwrap();

    // Validate the JSON report
    let record = read_report(&json_path);
    assert_eq!(record.scenario, "run");
    assert_eq!(record.driver_version, "2.0");
    assert_eq!(record.status, "initialized");
    assert_eq!(record.memory_allocated_bytes, Some(64));
    assert_eq!(record.workload_size, Some(10));
    assert_eq!(record.compute_result, Some(20));
    let temp = record.temperature_c.unwrap();
    assert!((50..=55).contains(&temp));

    // The JSONL record matches the report
    let stored = JsonlWriter::new(&record_path).read_all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].record_id, record.record_id);
}

#[test]
fn run_smoke_flag_overrides_config_version() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "[driver]\nversion = \"2.0\"\n");
    let json_path = dir.path().join("report.json");

    run_cmd::run(
        Some("1.0".to_string()),
        None,
        None,
        None,
        Some(config),
        Some(json_path.clone()),
        None,
    )
    .unwrap();

    let record = read_report(&json_path);
    assert_eq!(record.driver_version, "1.0", "flag beats config");
    let temp = record.temperature_c.unwrap();
    assert!((45..=50).contains(&temp), "temperature follows the flag version");
    // Unset flags fall back to the canonical scenario defaults
    assert_eq!(record.memory_allocated_bytes, Some(256));
    assert_eq!(record.compute_result, Some(200));
}

#[test]
fn run_smoke_config_version_applies_without_flag() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "[driver]\nversion = \"2.0\"\n");
    let json_path = dir.path().join("report.json");

    run_cmd::run(None, None, None, None, Some(config), Some(json_path.clone()), None).unwrap();

    assert_eq!(read_report(&json_path).driver_version, "2.0");
}

#[test]
fn run_smoke_config_memory_limit_aborts_scenario() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "[driver]\nmemory_limit_bytes = 256\n");
    let json_path = dir.path().join("report.json");

    let err = run_cmd::run(
        Some("1.0".to_string()),
        Some(512),
        None,
        None,
        Some(config),
        Some(json_path.clone()),
        None,
    )
    .unwrap_err();

    assert!(err.to_string().contains("memory limit exceeded"));
    assert!(!json_path.exists(), "failed scenario must not write a report");
}
