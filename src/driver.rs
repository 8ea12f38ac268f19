//! Simulated GPU driver state machine.
//!
//! Mimics a real driver's lifecycle closely enough to exercise CI plumbing:
//! a slow `initialize`, memory accounting, a version-dependent temperature
//! readout, and a compute dispatch with a fixed delay. No hardware is
//! touched; every delay runs through the injectable clock.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::clock::{Clock, SystemClock};
use crate::core::config::DriverSettings;
use crate::core::env;
use crate::{HarnessError, HarnessResult};

/// Fixed delay simulating hardware bring-up.
const INIT_DELAY: Duration = Duration::from_millis(100);
/// Fixed delay simulating a dispatched compute job.
const COMPUTE_DELAY: Duration = Duration::from_millis(100);

/// Temperature base for driver version "1.0" (exact string match).
const BASE_TEMP_V1_C: u32 = 45;
/// Temperature base for every other version string.
const BASE_TEMP_OTHER_C: u32 = 50;
/// Upper bound (inclusive) of the random temperature offset.
const TEMP_JITTER_MAX_C: u32 = 5;

/// Driver lifecycle state. There is no transition back to `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverStatus {
    Uninitialized,
    Initialized,
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverStatus::Uninitialized => write!(f, "uninitialized"),
            DriverStatus::Initialized => write!(f, "initialized"),
        }
    }
}

/// Simulated GPU driver.
///
/// One instance per scenario; state does not persist across runs. Not meant
/// for concurrent mutation.
pub struct GpuDriver {
    version: String,
    status: DriverStatus,
    memory_allocated: u64,
    memory_limit: Option<u64>,
    clock: Arc<dyn Clock>,
}

impl GpuDriver {
    /// Create a driver for an explicit version string.
    pub fn new(version: impl Into<String>) -> Self {
        GpuDriver {
            version: version.into(),
            status: DriverStatus::Uninitialized,
            memory_allocated: 0,
            memory_limit: None,
            clock: Arc::new(SystemClock::new()),
        }
    }

    /// Create a driver with the version taken from `DRIVER_VERSION`
    /// (default "1.0" when unset or empty).
    pub fn from_env() -> Self {
        Self::new(env::driver_version_from_env())
    }

    /// Create a driver from config settings, falling back to the
    /// environment for the version.
    pub fn from_settings(settings: &DriverSettings) -> Self {
        let version = settings
            .version
            .clone()
            .unwrap_or_else(env::driver_version_from_env);
        let mut driver = Self::new(version);
        driver.memory_limit = settings.memory_limit_bytes;
        driver
    }

    /// Replace the time source (tests use a mock clock).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Enable the opt-in allocation bound. Without it the counter is
    /// unbounded, as on the hardware this driver mimics.
    pub fn with_memory_limit(mut self, limit_bytes: u64) -> Self {
        self.memory_limit = Some(limit_bytes);
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn status(&self) -> DriverStatus {
        self.status
    }

    pub fn is_initialized(&self) -> bool {
        self.status == DriverStatus::Initialized
    }

    pub fn memory_allocated(&self) -> u64 {
        self.memory_allocated
    }

    /// Bring the driver up: sleeps 100ms, then reports readiness.
    ///
    /// Not guarded; calling again sleeps again and re-confirms.
    pub fn initialize(&mut self) -> String {
        self.clock.sleep(INIT_DELAY);
        self.status = DriverStatus::Initialized;
        debug!(version = %self.version, "driver initialized");
        format!("Driver {} initialized.", self.version)
    }

    /// Account for an allocation and return the new total.
    ///
    /// Requires an initialized driver. When a memory limit is configured the
    /// crossing allocation is rejected and the counter is left untouched.
    pub fn allocate_memory(&mut self, amount: u64) -> HarnessResult<u64> {
        if self.status != DriverStatus::Initialized {
            return Err(HarnessError::NotInitialized);
        }
        let new_total = self.memory_allocated.saturating_add(amount);
        if let Some(limit) = self.memory_limit {
            if new_total > limit {
                return Err(HarnessError::MemoryLimitExceeded {
                    requested: amount,
                    allocated: self.memory_allocated,
                    limit,
                });
            }
        }
        self.memory_allocated = new_total;
        debug!(amount, total = self.memory_allocated, "allocated memory");
        Ok(self.memory_allocated)
    }

    /// Release memory and return the new total, clamping at zero.
    ///
    /// Works in any lifecycle state, unlike `allocate_memory`.
    pub fn release_memory(&mut self, amount: u64) -> u64 {
        self.memory_allocated = self.memory_allocated.saturating_sub(amount);
        debug!(amount, total = self.memory_allocated, "released memory");
        self.memory_allocated
    }

    /// Simulated temperature readout in °C: version-dependent base plus a
    /// random offset in [0, 5]. Available in any state.
    pub fn temperature(&self) -> u32 {
        let base = if self.version == "1.0" {
            BASE_TEMP_V1_C
        } else {
            BASE_TEMP_OTHER_C
        };
        base + rand::thread_rng().gen_range(0..=TEMP_JITTER_MAX_C)
    }

    /// Dispatch a compute job: fixed 100ms delay, result is
    /// `workload_size * 2`, saturating at the `i64` bounds. Requires an
    /// initialized driver.
    ///
    /// Kept independent of [`crate::compute::run_workload`], which models the
    /// same job with jittered timing.
    pub fn run_compute(&self, workload_size: i64) -> HarnessResult<i64> {
        if self.status != DriverStatus::Initialized {
            return Err(HarnessError::NotInitialized);
        }
        self.clock.sleep(COMPUTE_DELAY);
        Ok(workload_size.saturating_mul(2))
    }
}
