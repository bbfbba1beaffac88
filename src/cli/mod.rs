//! CLI argument parsing for check-submodule-branch.
//!
//! Uses clap derive macros. The revision range comes from the environment
//! variables pre-commit exports, read here once and handed to the check as
//! plain values.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::gitmodules::GITMODULES_FILE;

/// Check that committed submodule commits belong to the branch declared
/// for them in `.gitmodules`.
///
/// Exits with the number of violations found (0 when everything is fine).
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "check-submodule-branch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Restrict the check to these paths (supplied by pre-commit).
    pub filenames: Vec<String>,

    /// Do not report submodules missing from `.gitmodules` or without a
    /// `branch` property.
    #[arg(long)]
    pub allow_unset: bool,

    /// Write the submodule's checked-out branch into `.gitmodules` when the
    /// `branch` property is missing or does not contain the commit.
    #[arg(long)]
    pub update_gitmodules_file: bool,

    /// Start of the revision range to check instead of staged changes.
    #[arg(long, env = "PRE_COMMIT_FROM_REF", value_name = "REV")]
    pub from_ref: Option<String>,

    /// End of the revision range to check instead of staged changes.
    #[arg(long, env = "PRE_COMMIT_TO_REF", value_name = "REV")]
    pub to_ref: Option<String>,

    /// Path of the submodule configuration, relative to the repository root.
    #[arg(long, value_name = "PATH", default_value = GITMODULES_FILE)]
    pub gitmodules: PathBuf,

    /// Increase log verbosity (-v: info, -vv: debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Default log directive implied by `--verbose`.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "check_submodule_branch=warn",
            1 => "check_submodule_branch=info",
            _ => "check_submodule_branch=debug",
        }
    }
}
