//! Error types for check-submodule-branch.
//!
//! Uses thiserror for derive macros. Every variant is fatal to the run;
//! per-submodule problems are violations, not errors (see `validate`).

use crate::exit_codes;
use thiserror::Error;

/// Main error type for the hook.
#[derive(Error, Debug)]
pub enum CheckError {
    /// Invalid invocation or an I/O problem outside of git.
    #[error("{0}")]
    UserError(String),

    /// The `.gitmodules` text has a property outside a submodule section,
    /// an empty section name, or an empty key.
    #[error(".gitmodules malformed: {0}")]
    MalformedConfig(String),

    /// A `git diff --raw` record did not have the expected shape.
    #[error("unexpected diff record: {0}")]
    DiffFormat(String),

    /// Git could not be spawned or exited non-zero.
    #[error("Git operation failed: {0}")]
    GitError(String),
}

impl CheckError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckError::UserError(_) => exit_codes::USER_ERROR,
            CheckError::MalformedConfig(_) => exit_codes::MALFORMED_CONFIG,
            CheckError::DiffFormat(_) => exit_codes::DIFF_FORMAT,
            CheckError::GitError(_) => exit_codes::GIT_FAILURE,
        }
    }
}

/// Result type alias for hook operations.
pub type Result<T> = std::result::Result<T, CheckError>;
