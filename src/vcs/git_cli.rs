//! [`Vcs`] implementation backed by the git command line.

use crate::error::Result;
use crate::git::run_git;
use std::path::{Path, PathBuf};

use super::{RevisionRange, Vcs};

/// Runs git in the superproject root (diffs) or a submodule checkout
/// (branch queries).
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_root: PathBuf,
}

impl GitCli {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }
}

impl Vcs for GitCli {
    fn diff(&self, range: Option<&RevisionRange>, paths: &[String]) -> Result<String> {
        let range_arg = match range {
            Some(range) => range.to_diff_arg(),
            None => "--staged".to_string(),
        };

        let mut args = vec![
            "diff",
            "--raw",
            "--no-abbrev",
            "--no-ext-diff",
            "--diff-filter=ACMR",
            range_arg.as_str(),
            "--",
        ];
        args.extend(paths.iter().map(String::as_str));

        Ok(run_git(&self.repo_root, &args)?.stdout)
    }

    fn branch_contains(&self, branch: &str, commit: &str, cwd: &Path) -> Result<String> {
        let output = run_git(cwd, &["branch", "--list", branch, "--contains", commit])?;
        Ok(output.stdout)
    }

    fn current_branch_name(&self, cwd: &Path) -> Result<String> {
        let output = run_git(cwd, &["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(output.stdout.trim().to_string())
    }
}
