pub mod bench_cmd;
pub mod export_cmd;
pub mod matrix_cmd;
pub mod run_cmd;

pub mod compute;
pub mod core;
pub mod driver;
pub mod matrix;
pub mod storage;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    /// Lifecycle guard tripped: allocate/compute called before `initialize`.
    #[error("Driver not initialized")]
    NotInitialized,
    /// Only reachable when an explicit memory limit is configured.
    #[error("memory limit exceeded: requested {requested} bytes with {allocated} allocated (limit {limit})")]
    MemoryLimitExceeded {
        requested: u64,
        allocated: u64,
        limit: u64,
    },
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;

pub use crate::compute::{BenchmarkOutput, benchmark_compute, run_workload};
pub use crate::core::clock::{Clock, MockClock, SystemClock};
pub use crate::driver::{DriverStatus, GpuDriver};
