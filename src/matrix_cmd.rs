//! Matrix subcommand: JSON on stdout, diagnostics on stderr.
//!
//! Workflow steps pipe stdout straight into their matrix input, so nothing
//! else may be printed there.

use crate::matrix::{self, DEFAULT_BASE_REF};
use crate::{HarnessError, HarnessResult};

pub fn run(base_ref: Option<String>) -> HarnessResult<()> {
    let base_ref = base_ref.unwrap_or_else(|| DEFAULT_BASE_REF.to_string());
    let changed = matrix::changed_files(&base_ref);

    let selected = matrix::generate_matrix(&changed);
    let json = serde_json::to_string_pretty(&selected)
        .map_err(|e| HarnessError::Message(format!("failed to serialize matrix: {e}")))?;
    println!("{json}");

    if !changed.is_empty() {
        eprintln!();
        eprintln!("Changed files: {}", changed.len());
        for path in changed.iter().take(5) {
            eprintln!("  - {path}");
        }
        if changed.len() > 5 {
            eprintln!("  ... and {} more", changed.len() - 5);
        }
    }

    Ok(())
}
