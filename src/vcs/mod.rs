//! Version-control collaborator used by the hook.
//!
//! The validator only needs three queries, so they sit behind the [`Vcs`]
//! trait: the real implementation shells out to git ([`GitCli`]); tests use
//! an in-memory fake.

mod git_cli;

pub use git_cli::GitCli;

use crate::error::Result;
use std::path::Path;

/// Symbolic name reported for a detached HEAD.
pub const DETACHED_HEAD: &str = "HEAD";

/// An explicit `<from>...<to>` revision range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRange {
    pub from: String,
    pub to: String,
}

impl RevisionRange {
    /// Build a range only when both ends are present and non-empty.
    pub fn from_refs(from: Option<&str>, to: Option<&str>) -> Option<Self> {
        match (from, to) {
            (Some(from), Some(to)) if !from.is_empty() && !to.is_empty() => Some(Self {
                from: from.to_string(),
                to: to.to_string(),
            }),
            _ => None,
        }
    }

    /// The symmetric-difference argument passed to `git diff`.
    pub fn to_diff_arg(&self) -> String {
        format!("{}...{}", self.from, self.to)
    }
}

/// Synchronous request/response channel to the version-control system.
///
/// Every failure is fatal to the run; there are no retries.
pub trait Vcs {
    /// Raw diff records for added, copied, modified and renamed paths,
    /// between `range` or of the staged changes when `range` is `None`,
    /// restricted to `paths` when non-empty.
    fn diff(&self, range: Option<&RevisionRange>, paths: &[String]) -> Result<String>;

    /// Listing of local branches matching `branch` that contain `commit`,
    /// queried inside the repository at `cwd`.
    fn branch_contains(&self, branch: &str, commit: &str, cwd: &Path) -> Result<String>;

    /// Symbolic branch name checked out at `cwd`, or [`DETACHED_HEAD`].
    fn current_branch_name(&self, cwd: &Path) -> Result<String>;
}

/// Whether a `git branch --list` listing names `branch` exactly.
///
/// Lines carry a two-column marker: `* ` for the checked-out branch,
/// `+ ` for a branch checked out in another worktree.
pub fn listing_contains_branch(listing: &str, branch: &str) -> bool {
    listing.lines().any(|line| {
        let name = line.trim();
        let name = name
            .strip_prefix("* ")
            .or_else(|| name.strip_prefix("+ "))
            .unwrap_or(name);
        name.trim() == branch
    })
}
