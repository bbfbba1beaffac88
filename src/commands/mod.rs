//! Command implementations for check-submodule-branch.

pub mod check;

pub use check::{CheckOptions, cmd_check, run_check};
