use crate::error::{CheckError, Result};
use crate::vcs::{RevisionRange, Vcs};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    init_repo(temp_dir.path());
    temp_dir
}

/// Initialize a repository on `main` with one commit.
fn init_repo(path: &Path) {
    std::fs::create_dir_all(path).unwrap();
    git(path, &["init"]);
    // Deterministic default branch name across environments.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);
}

/// A superproject with two submodules, laid out as:
///
/// ```text
/// <tmp>/repo_a, <tmp>/repo_b   upstream repositories
/// <tmp>/repo                   superproject
/// <tmp>/repo/a                 submodule `a` checked out on branch_a
/// <tmp>/repo/b                 submodule `b` checked out on branch_b
/// ```
///
/// `.gitmodules` declares `branch = branch_a` / `branch = branch_b` and
/// everything is committed.
pub(crate) struct SubmoduleFixture {
    pub(crate) temp_dir: TempDir,
}

pub(crate) const FIXTURE_GITMODULES: &str = "[submodule \"a\"]
\tpath = a
\turl = ../repo_a
\tbranch = branch_a
[submodule \"b\"]
\tpath = b
\turl = ../repo_b
\tbranch = branch_b
";

impl SubmoduleFixture {
    pub(crate) fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        let repo = base.join("repo");
        init_repo(&base.join("repo_a"));
        init_repo(&base.join("repo_b"));
        init_repo(&repo);

        for (name, branch) in [("a", "branch_a"), ("b", "branch_b")] {
            let url = format!("../repo_{}", name);
            git(
                &repo,
                &[
                    "-c",
                    "protocol.file.allow=always",
                    "submodule",
                    "add",
                    &url,
                    name,
                ],
            );
            let checkout = repo.join(name);
            git(&checkout, &["config", "user.email", "test@example.com"]);
            git(&checkout, &["config", "user.name", "Test User"]);
            git(&checkout, &["checkout", "-b", branch]);
        }

        // Declare the branches with a fixed layout so tests can compare text exactly.
        std::fs::write(repo.join(".gitmodules"), FIXTURE_GITMODULES).unwrap();
        git(&repo, &["add", "."]);
        git(&repo, &["commit", "-m", "Add submodules"]);

        Self { temp_dir }
    }

    pub(crate) fn repo(&self) -> PathBuf {
        self.temp_dir.path().join("repo")
    }

    pub(crate) fn submodule(&self, name: &str) -> PathBuf {
        self.repo().join(name)
    }

    pub(crate) fn gitmodules_path(&self) -> PathBuf {
        self.repo().join(".gitmodules")
    }

    /// Make a new empty commit inside a submodule and return its id.
    pub(crate) fn commit_in_submodule(&self, name: &str, message: &str) -> String {
        let checkout = self.submodule(name);
        git(&checkout, &["commit", "--allow-empty", "-m", message]);
        git(&checkout, &["rev-parse", "HEAD"])
    }

    /// Stage everything in the superproject.
    pub(crate) fn stage_all(&self) {
        git(&self.repo(), &["add", "."]);
    }
}

/// Run git and return trimmed stdout, panicking on failure.
pub(crate) fn git(repo_dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }

    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// In-memory [`Vcs`] with canned answers and a call log.
#[derive(Debug, Default)]
pub(crate) struct FakeVcs {
    pub(crate) diff_output: String,
    /// `(branch, commit)` pairs for which the commit is on the branch.
    pub(crate) reachable: HashSet<(String, String)>,
    /// Checked-out branch per working directory.
    pub(crate) current_branches: HashMap<PathBuf, String>,
    pub(crate) calls: RefCell<Vec<String>>,
}

impl FakeVcs {
    pub(crate) fn with_diff(diff_output: impl Into<String>) -> Self {
        Self {
            diff_output: diff_output.into(),
            ..Self::default()
        }
    }

    pub(crate) fn reachable(mut self, branch: &str, commit: &str) -> Self {
        self.reachable
            .insert((branch.to_string(), commit.to_string()));
        self
    }

    pub(crate) fn checked_out(mut self, cwd: impl Into<PathBuf>, branch: &str) -> Self {
        self.current_branches.insert(cwd.into(), branch.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Vcs for FakeVcs {
    fn diff(&self, range: Option<&RevisionRange>, paths: &[String]) -> Result<String> {
        let range = range.map_or_else(|| "--staged".to_string(), RevisionRange::to_diff_arg);
        self.calls
            .borrow_mut()
            .push(format!("diff {} -- {}", range, paths.join(" ")));
        Ok(self.diff_output.clone())
    }

    fn branch_contains(&self, branch: &str, commit: &str, cwd: &Path) -> Result<String> {
        self.calls.borrow_mut().push(format!(
            "branch_contains {} {} {}",
            branch,
            commit,
            cwd.display()
        ));
        if self
            .reachable
            .contains(&(branch.to_string(), commit.to_string()))
        {
            Ok(format!("  {}", branch))
        } else {
            Ok(String::new())
        }
    }

    fn current_branch_name(&self, cwd: &Path) -> Result<String> {
        self.calls
            .borrow_mut()
            .push(format!("current_branch_name {}", cwd.display()));
        self.current_branches
            .get(cwd)
            .cloned()
            .ok_or_else(|| CheckError::GitError(format!("no checkout at '{}'", cwd.display())))
    }
}
