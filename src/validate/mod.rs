//! Submodule branch validation.
//!
//! For each submodule pointer change in a diff:
//! - the submodule must be registered in `.gitmodules`
//! - its section must declare a `branch`
//! - the committed submodule commit must be reachable from that branch
//!
//! Optionally, a missing or stale `branch` is corrected from the
//! submodule's checked-out branch.

mod types;
mod validator;


pub use types::{Finding, ValidationOptions, ValidationOutcome, Violation};
pub use validator::BranchValidator;
