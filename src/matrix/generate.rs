//! Matrix selection rules.

use tracing::debug;

use super::schema::TestMatrix;

/// Path fragments whose changes force the expanded matrix.
const CRITICAL_PATHS: &[&str] = &["src/driver", "src/compute", "tests/"];

/// True when any changed path touches a critical fragment (substring match).
pub fn should_run_full_matrix(changed: &[String]) -> bool {
    changed
        .iter()
        .any(|path| CRITICAL_PATHS.iter().any(|fragment| path.contains(fragment)))
}

/// Pick the matrix for a set of changed files.
///
/// An empty list means the diff could not be determined; that errs on the
/// side of the expanded matrix.
pub fn generate_matrix(changed: &[String]) -> TestMatrix {
    if changed.is_empty() || should_run_full_matrix(changed) {
        debug!(files = changed.len(), "selected full matrix");
        TestMatrix::full()
    } else {
        debug!(files = changed.len(), "selected minimal matrix");
        TestMatrix::minimal()
    }
}
