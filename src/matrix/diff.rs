//! Changed-file discovery via `git diff`.

use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Base ref compared against HEAD when none is given.
pub const DEFAULT_BASE_REF: &str = "HEAD~1";

/// Parse `git diff --name-only` output into a list of paths.
pub fn parse_name_only(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// List files changed between `base_ref` and HEAD in the current directory.
pub fn changed_files(base_ref: &str) -> Vec<String> {
    changed_files_in(Path::new("."), base_ref)
}

/// List files changed between `base_ref` and HEAD in `repo_dir`.
///
/// Any git failure (missing binary, unknown ref, not a repository) yields an
/// empty list; callers treat that as an unknown diff and expand the matrix.
pub fn changed_files_in(repo_dir: &Path, base_ref: &str) -> Vec<String> {
    let output = Command::new("git")
        .args(["diff", "--name-only", base_ref, "HEAD"])
        .current_dir(repo_dir)
        .output();

    match output {
        Ok(o) if o.status.success() => parse_name_only(&String::from_utf8_lossy(&o.stdout)),
        Ok(o) => {
            debug!(status = %o.status, "git diff failed");
            Vec::new()
        }
        Err(e) => {
            debug!(error = %e, "could not run git");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_only_splits_lines() {
        let output = "README.md\nsrc/driver.rs\ntests/full_workflow.rs\n";
        assert_eq!(
            parse_name_only(output),
            vec!["README.md", "src/driver.rs", "tests/full_workflow.rs"]
        );
    }

    #[test]
    fn test_parse_name_only_skips_blank_lines() {
        let output = "\nREADME.md\n\n  \nsrc/compute.rs\n";
        assert_eq!(parse_name_only(output), vec!["README.md", "src/compute.rs"]);
    }

    #[test]
    fn test_parse_name_only_empty_output() {
        assert!(parse_name_only("").is_empty());
        assert!(parse_name_only("\n\n").is_empty());
    }

    #[test]
    fn test_changed_files_in_non_repo_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(changed_files_in(dir.path(), DEFAULT_BASE_REF).is_empty());
    }
}
