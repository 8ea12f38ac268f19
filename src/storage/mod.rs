//! Storage layer for harness records.
//!
//! Records append to JSONL for CI artifact uploads; CSV export flattens them
//! for spreadsheet-style inspection.

pub mod csv;
pub mod jsonl;

// Re-export key types
pub use csv::{CSV_HEADERS, CsvExporter};
pub use jsonl::JsonlWriter;
