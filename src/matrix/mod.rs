//! CI test-matrix generation from version-control diffs.

pub mod diff;
pub mod generate;
pub mod schema;

// Re-export key types for convenience
pub use diff::{DEFAULT_BASE_REF, changed_files};
pub use generate::{generate_matrix, should_run_full_matrix};
pub use schema::{MatrixExclude, TestMatrix};
