//! JSONL (JSON Lines) storage for harness records.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::HarnessError;
use crate::core::schema::{HarnessRecord, SCHEMA_VERSION};

/// JSONL writer/reader for harness records.
///
/// One JSON object per line, so CI jobs can append without reading the file
/// back and artifact diffs stay line-oriented.
#[derive(Debug, Clone)]
pub struct JsonlWriter {
    path: PathBuf,
}

impl JsonlWriter {
    /// Create a writer for the given path; the file is created on first
    /// append.
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonlWriter {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a single record.
    ///
    /// Rejects records whose `schema_version` does not match
    /// `SCHEMA_VERSION`, so mixed-version files never form silently.
    pub fn append(&self, record: &HarnessRecord) -> Result<(), HarnessError> {
        if record.schema_version != SCHEMA_VERSION {
            return Err(HarnessError::Message(format!(
                "schema version mismatch: record has v{}, expected v{}",
                record.schema_version, SCHEMA_VERSION
            )));
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| HarnessError::Message(format!("failed to create directory: {e}")))?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| HarnessError::Message(format!("failed to open file: {e}")))?;

        let json = serde_json::to_string(record)
            .map_err(|e| HarnessError::Message(format!("failed to serialize record: {e}")))?;

        writeln!(file, "{}", json)
            .map_err(|e| HarnessError::Message(format!("failed to write record: {e}")))?;

        Ok(())
    }

    /// Read all records from the file.
    pub fn read_all(&self) -> Result<Vec<HarnessRecord>, HarnessError> {
        self.read_filtered(None)
    }

    /// Read records, optionally keeping only a given scenario.
    ///
    /// Errors if the file is missing or any non-empty line fails to parse.
    pub fn read_filtered(&self, scenario: Option<&str>) -> Result<Vec<HarnessRecord>, HarnessError> {
        if !self.path.exists() {
            return Err(HarnessError::Message(format!(
                "file not found: {}",
                self.path.display()
            )));
        }

        let file = File::open(&self.path)
            .map_err(|e| HarnessError::Message(format!("failed to open file: {e}")))?;

        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(|e| {
                HarnessError::Message(format!("failed to read line {}: {e}", line_num + 1))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let record: HarnessRecord = serde_json::from_str(&line).map_err(|e| {
                HarnessError::Message(format!("failed to parse line {}: {e}", line_num + 1))
            })?;

            if let Some(name) = scenario {
                if record.scenario != name {
                    continue;
                }
            }

            records.push(record);
        }

        Ok(records)
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Number of records in the file (reads through the whole file).
    pub fn count(&self) -> Result<usize, HarnessError> {
        if !self.path.exists() {
            return Ok(0);
        }

        let file = File::open(&self.path)
            .map_err(|e| HarnessError::Message(format!("failed to open file: {e}")))?;

        let reader = BufReader::new(file);
        let count = reader
            .lines()
            .filter_map(|l| l.ok())
            .filter(|l| !l.trim().is_empty())
            .count();

        Ok(count)
    }
}
