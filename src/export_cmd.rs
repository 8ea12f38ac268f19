use std::path::PathBuf;

use tracing::info;

use crate::HarnessResult;
use crate::storage::{CsvExporter, JsonlWriter};

/// Read recorded runs from a JSONL file and export them as CSV, either to a
/// file or to stdout.
pub fn run(
    records: PathBuf,
    csv_out: Option<PathBuf>,
    scenario: Option<String>,
) -> HarnessResult<()> {
    let reader = JsonlWriter::new(&records);
    let list = reader.read_filtered(scenario.as_deref())?;
    info!(count = list.len(), "records loaded");

    let exporter = CsvExporter::new();
    match csv_out {
        Some(path) => {
            exporter.export(&list, &path)?;
            println!("export: {} records -> {}", list.len(), path.display());
        }
        None => exporter.export_to_stdout(&list)?,
    }

    Ok(())
}
