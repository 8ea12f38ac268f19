//! Test-matrix schema in the shape CI workflow files expect.

use serde::{Deserialize, Serialize};

/// One excluded matrix combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixExclude {
    pub os: String,
    #[serde(rename = "gpu-driver-version")]
    pub gpu_driver_version: String,
}

/// A CI test matrix. Keys serialize hyphenated to match workflow syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestMatrix {
    pub os: Vec<String>,
    #[serde(rename = "rust-version")]
    pub rust_version: Vec<String>,
    #[serde(rename = "gpu-driver-version")]
    pub gpu_driver_version: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<MatrixExclude>>,
}

impl TestMatrix {
    /// Cheap single-combination matrix for low-risk changes.
    pub fn minimal() -> Self {
        TestMatrix {
            os: vec!["ubuntu-latest".to_string()],
            rust_version: vec!["1.86".to_string()],
            gpu_driver_version: vec!["2.0".to_string()],
            exclude: None,
        }
    }

    /// Expanded matrix for critical-path changes and unknown diffs.
    ///
    /// Driver 2.0 is not validated on Windows runners, hence the exclude.
    pub fn full() -> Self {
        TestMatrix {
            os: vec!["ubuntu-latest".to_string(), "windows-latest".to_string()],
            rust_version: vec![
                "1.85".to_string(),
                "1.86".to_string(),
                "1.87".to_string(),
            ],
            gpu_driver_version: vec!["1.0".to_string(), "2.0".to_string()],
            exclude: Some(vec![MatrixExclude {
                os: "windows-latest".to_string(),
                gpu_driver_version: "2.0".to_string(),
            }]),
        }
    }
}
