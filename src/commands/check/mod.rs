//! Implementation of the submodule branch check.
//!
//! # Steps
//!
//! 1. Read and parse `.gitmodules` (a missing file disables lookups, so
//!    every submodule change is unregistered)
//! 2. Fetch raw diff records for the staged changes or the revision range
//! 3. Validate each submodule pointer change
//! 4. Persist the corrected `.gitmodules` if it changed
//! 5. Report violations; their count becomes the exit code

mod report;


use crate::cli::Cli;
use crate::diff::parse_raw_diff;
use crate::error::{CheckError, Result};
use crate::fs::atomic_write_file;
use crate::git::get_repo_root;
use crate::gitmodules::GitmodulesDocument;
use crate::validate::{BranchValidator, ValidationOptions, ValidationOutcome};
use crate::vcs::{GitCli, RevisionRange, Vcs};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use report::{format_report, print_report};

/// Everything a check run needs, resolved from the CLI and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Absolute path of the superproject's working tree.
    pub repo_root: PathBuf,
    /// `.gitmodules` location; relative paths are taken from `repo_root`.
    pub gitmodules_path: PathBuf,
    /// Pathspecs limiting the diff; empty means the whole tree.
    pub filenames: Vec<String>,
    /// Revision range to diff instead of the staged changes.
    pub range: Option<RevisionRange>,
    pub validation: ValidationOptions,
}

impl CheckOptions {
    pub fn from_cli(cli: &Cli, repo_root: PathBuf) -> Self {
        Self {
            repo_root,
            gitmodules_path: cli.gitmodules.clone(),
            filenames: cli.filenames.clone(),
            range: RevisionRange::from_refs(cli.from_ref.as_deref(), cli.to_ref.as_deref()),
            validation: ValidationOptions {
                allow_unset: cli.allow_unset,
                update_gitmodules: cli.update_gitmodules_file,
            },
        }
    }

    fn resolved_gitmodules_path(&self) -> PathBuf {
        self.repo_root.join(&self.gitmodules_path)
    }
}

/// Execute the check from the current working directory.
///
/// Prints the report and returns the number of violations.
pub fn cmd_check(cli: Cli) -> Result<usize> {
    let cwd = env::current_dir().map_err(|e| {
        CheckError::UserError(format!("failed to get current working directory: {}", e))
    })?;
    let repo_root = get_repo_root(&cwd)?;
    let options = CheckOptions::from_cli(&cli, repo_root);
    let vcs = GitCli::new(&options.repo_root);

    let outcome = run_check(&vcs, &options)?;
    print_report(&outcome);

    Ok(outcome.violation_count())
}

/// Run the check against an arbitrary VCS collaborator.
///
/// # Errors
///
/// * `CheckError::MalformedConfig` - `.gitmodules` could not be parsed
/// * `CheckError::DiffFormat` - unexpected raw diff output
/// * `CheckError::GitError` - any VCS query failed
/// * `CheckError::UserError` - `.gitmodules` could not be read or written
pub fn run_check<V: Vcs + ?Sized>(vcs: &V, options: &CheckOptions) -> Result<ValidationOutcome> {
    let gitmodules_path = options.resolved_gitmodules_path();
    let document = load_gitmodules(&gitmodules_path)?;

    let raw_diff = vcs.diff(options.range.as_ref(), &options.filenames)?;
    debug!(
        range = ?options.range,
        bytes = raw_diff.len(),
        "retrieved raw diff"
    );

    let validator = BranchValidator::new(vcs, &options.repo_root, options.validation);
    let outcome = validator.validate(document.as_ref(), parse_raw_diff(&raw_diff))?;

    if let Some(text) = &outcome.updated_gitmodules {
        atomic_write_file(&gitmodules_path, text)?;
        info!(path = %gitmodules_path.display(), "rewrote submodule configuration");
    }

    Ok(outcome)
}

/// Read and parse `.gitmodules`, or `None` when the file does not exist.
fn load_gitmodules(path: &Path) -> Result<Option<GitmodulesDocument>> {
    if !path.exists() {
        debug!(path = %path.display(), "no submodule configuration");
        return Ok(None);
    }

    let text = std::fs::read_to_string(path).map_err(|e| {
        CheckError::UserError(format!("failed to read '{}': {}", path.display(), e))
    })?;

    GitmodulesDocument::parse(&text).map(Some)
}
