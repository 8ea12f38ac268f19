//! Core types for gpu-harness.
//!
//! This module contains the clock abstraction, the canonical `HarnessRecord`
//! schema (v1) used for all harness outputs, and config/env plumbing.

pub mod clock;
pub mod config;
pub mod env;
pub mod schema;
pub mod stats;

// Re-export key types for convenience
pub use clock::{Clock, MockClock, SystemClock};
pub use config::HarnessConfig;
pub use env::EnvironmentInfo;
pub use schema::{HarnessRecord, RunParams, SCHEMA_VERSION};
pub use stats::LatencyStats;
