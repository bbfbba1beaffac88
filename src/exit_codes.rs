//! Exit code constants for check-submodule-branch.
//!
//! On a completed run the exit code is the number of violations found, so
//! fatal error codes live above the largest reportable violation count:
//! - 0: Success (no violations)
//! - 1..=250: Number of violations (clamped at 250)
//! - 251: User error (bad args, unreadable files, not in a repository)
//! - 252: Malformed `.gitmodules`
//! - 253: Unexpected `git diff --raw` output
//! - 254: Git operation failure

/// Successful execution, no violations.
pub const SUCCESS: i32 = 0;

/// Largest violation count reported as-is; higher counts are clamped to it.
pub const MAX_VIOLATION_EXIT: i32 = 250;

/// User error: bad arguments, unreadable or unwritable files, not a repository.
pub const USER_ERROR: i32 = 251;

/// The `.gitmodules` file has a property outside any section or an empty name.
pub const MALFORMED_CONFIG: i32 = 252;

/// A raw diff record could not be decomposed.
pub const DIFF_FORMAT: i32 = 253;

/// Git operation failure: spawn failure or non-zero exit.
pub const GIT_FAILURE: i32 = 254;

/// Map a violation count onto the exit code range reserved for it.
pub fn from_violation_count(count: usize) -> i32 {
    i32::try_from(count)
        .unwrap_or(MAX_VIOLATION_EXIT)
        .min(MAX_VIOLATION_EXIT)
}
