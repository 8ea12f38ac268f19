//! Environment detection and driver-version resolution.

use std::process::Command;

use serde::{Deserialize, Serialize};

/// Environment variable consulted for the simulated driver version.
pub const DRIVER_VERSION_ENV: &str = "DRIVER_VERSION";

/// Version assumed when the variable is unset or empty.
pub const DEFAULT_DRIVER_VERSION: &str = "1.0";

/// Resolve a raw env value to a driver version, applying the default rule.
pub fn version_or_default(raw: Option<String>) -> String {
    raw.filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_DRIVER_VERSION.to_string())
}

/// Read `DRIVER_VERSION` from the process environment.
pub fn driver_version_from_env() -> String {
    version_or_default(std::env::var(DRIVER_VERSION_ENV).ok())
}

/// Environment information stamped into harness records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    pub os: String,

    pub arch: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_cores: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_ram_bytes: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_sha: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_dirty: Option<bool>,
}

impl Default for EnvironmentInfo {
    fn default() -> Self {
        EnvironmentInfo {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            cpu_model: None,
            cpu_cores: None,
            total_ram_bytes: None,
            hostname: None,
            git_sha: None,
            git_dirty: None,
        }
    }
}

impl EnvironmentInfo {
    /// Detect environment information from the current system
    pub fn detect() -> Self {
        use sysinfo::System;

        let mut sys = System::new_all();
        sys.refresh_all();

        let cpu_model = sys.cpus().first().map(|c| c.brand().to_string());
        let cpu_cores = sys.physical_core_count().map(|c| c as u32);
        let total_ram_bytes = Some(sys.total_memory());
        let os = System::name().unwrap_or_else(|| std::env::consts::OS.to_string());
        let hostname = System::host_name();

        EnvironmentInfo {
            os,
            arch: std::env::consts::ARCH.to_string(),
            cpu_model,
            cpu_cores,
            total_ram_bytes,
            hostname,
            git_sha: detect_git_sha(),
            git_dirty: detect_git_dirty(),
        }
    }
}

/// Detect git SHA from `git rev-parse HEAD`
fn detect_git_sha() -> Option<String> {
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Detect if git working directory is dirty
fn detect_git_dirty() -> Option<bool> {
    Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| !o.stdout.is_empty())
}
