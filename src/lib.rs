//! check-submodule-branch: pre-commit hook that verifies submodule pointer
//! changes against the branches declared in `.gitmodules`.
//!
//! The binary in `main.rs` is a thin wrapper around [`commands::cmd_check`].

pub mod cli;
pub mod commands;
pub mod diff;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod git;
pub mod gitmodules;
pub mod validate;
pub mod vcs;

#[cfg(test)]
mod test_support;
