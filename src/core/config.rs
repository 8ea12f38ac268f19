//! Harness configuration from `harness-config.toml`.

use std::path::Path;

use serde::Deserialize;

use crate::{HarnessError, HarnessResult};

/// Config file consulted when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "harness-config.toml";

/// `[driver]` section
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DriverSettings {
    /// Simulated driver version (takes precedence over DRIVER_VERSION)
    #[serde(default)]
    pub version: Option<String>,
    /// Opt-in allocation bound; absent means unbounded
    #[serde(default)]
    pub memory_limit_bytes: Option<u64>,
}

/// `[bench]` section
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BenchSettings {
    /// Workload size for bench iterations
    #[serde(default)]
    pub workload_size: Option<i64>,
    /// Number of measured iterations
    #[serde(default)]
    pub iterations: Option<usize>,
    /// Number of warmup iterations
    #[serde(default)]
    pub warmup: Option<usize>,
}

/// Full harness config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct HarnessConfig {
    #[serde(default)]
    pub driver: DriverSettings,
    #[serde(default)]
    pub bench: BenchSettings,
}

impl HarnessConfig {
    pub fn load(path: &Path) -> HarnessResult<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| HarnessError::Message(format!("failed to read config: {e}")))?;
        toml::from_str(&s)
            .map_err(|e| HarnessError::Message(format!("failed to parse config: {e}")))
    }

    /// Resolve the effective config: an explicit path must load, the default
    /// file is used when present, and absence falls back to built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> HarnessResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [driver]
            version = "2.0"
            memory_limit_bytes = 1048576

            [bench]
            workload_size = 250
            iterations = 5
            warmup = 2
        "#;
        let cfg: HarnessConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.driver.version.as_deref(), Some("2.0"));
        assert_eq!(cfg.driver.memory_limit_bytes, Some(1_048_576));
        assert_eq!(cfg.bench.workload_size, Some(250));
        assert_eq!(cfg.bench.iterations, Some(5));
        assert_eq!(cfg.bench.warmup, Some(2));
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"
            [driver]
            version = "1.0"
        "#;
        let cfg: HarnessConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.driver.version.as_deref(), Some("1.0"));
        assert!(cfg.driver.memory_limit_bytes.is_none());
        assert!(cfg.bench.iterations.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let cfg: HarnessConfig = toml::from_str("").unwrap();
        assert!(cfg.driver.version.is_none());
        assert!(cfg.bench.workload_size.is_none());
    }

    #[test]
    fn test_load_missing_explicit_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(HarnessConfig::load(&missing).is_err());
    }

    #[test]
    fn test_load_roundtrip_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harness-config.toml");
        std::fs::write(&path, "[driver]\nmemory_limit_bytes = 4096\n").unwrap();
        let cfg = HarnessConfig::load(&path).unwrap();
        assert_eq!(cfg.driver.memory_limit_bytes, Some(4096));
    }
}
