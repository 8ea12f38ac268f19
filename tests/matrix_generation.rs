//! Matrix selection against real git repositories.
//!
//! These tests build throwaway repositories with `git init` and assert on
//! the diff-to-matrix pipeline end to end. They skip when git is missing.

use std::path::Path;
use std::process::Command;

use gpu_harness::matrix::diff::changed_files_in;
use gpu_harness::matrix::{DEFAULT_BASE_REF, TestMatrix, generate_matrix};

/// Check if git is available in PATH.
fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Run a git command in `dir` with identity config pinned for CI machines.
fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args([
            "-c",
            "user.name=harness",
            "-c",
            "user.email=harness@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .status()
        .expect("failed to spawn git");
    assert!(status.success(), "git {args:?} failed");
}

fn commit_file(repo: &Path, rel_path: &str, contents: &str, message: &str) {
    let path = repo.join(rel_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    git(repo, &["add", "."]);
    git(repo, &["commit", "-q", "-m", message]);
}

#[test]
fn test_docs_change_selects_minimal_matrix() {
    if !git_available() {
        eprintln!("Skipping test: git not found in PATH");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path();
    git(repo, &["init", "-q"]);
    commit_file(repo, "README.md", "docs\n", "initial");
    commit_file(repo, "README.md", "docs v2\n", "update docs");

    let changed = changed_files_in(repo, DEFAULT_BASE_REF);
    assert_eq!(changed, vec!["README.md"]);
    assert_eq!(generate_matrix(&changed), TestMatrix::minimal());
}

#[test]
fn test_driver_change_selects_full_matrix() {
    if !git_available() {
        eprintln!("Skipping test: git not found in PATH");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path();
    git(repo, &["init", "-q"]);
    commit_file(repo, "src/driver.rs", "pub fn init() {}\n", "initial");
    commit_file(repo, "src/driver.rs", "pub fn init() { /* v2 */ }\n", "touch driver");

    let changed = changed_files_in(repo, DEFAULT_BASE_REF);
    assert_eq!(changed, vec!["src/driver.rs"]);

    let matrix = generate_matrix(&changed);
    assert_eq!(matrix, TestMatrix::full());
    assert!(matrix.exclude.is_some(), "full matrix carries the exclude list");
}

#[test]
fn test_test_directory_change_selects_full_matrix() {
    if !git_available() {
        eprintln!("Skipping test: git not found in PATH");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path();
    git(repo, &["init", "-q"]);
    commit_file(repo, "tests/smoke.rs", "#[test] fn t() {}\n", "initial");
    commit_file(repo, "tests/smoke.rs", "#[test] fn t() { assert!(true); }\n", "touch tests");

    let changed = changed_files_in(repo, DEFAULT_BASE_REF);
    assert_eq!(generate_matrix(&changed), TestMatrix::full());
}

#[test]
fn test_unresolvable_base_ref_falls_back_to_full_matrix() {
    if !git_available() {
        eprintln!("Skipping test: git not found in PATH");
        return;
    }

    // A single-commit repository has no HEAD~1 to diff against.
    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path();
    git(repo, &["init", "-q"]);
    commit_file(repo, "README.md", "docs\n", "initial");

    let changed = changed_files_in(repo, DEFAULT_BASE_REF);
    assert!(changed.is_empty(), "failed diff must yield an empty list");
    assert_eq!(generate_matrix(&changed), TestMatrix::full());
}

#[test]
fn test_outside_a_repository_falls_back_to_full_matrix() {
    let dir = tempfile::tempdir().unwrap();
    let changed = changed_files_in(dir.path(), DEFAULT_BASE_REF);
    assert!(changed.is_empty());
    assert_eq!(generate_matrix(&changed), TestMatrix::full());
}
