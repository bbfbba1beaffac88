//! Core types for submodule branch validation results and violations.

use std::fmt;

/// Switches controlling how strict validation is and whether
/// `.gitmodules` may be corrected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Do not count unregistered submodules or missing `branch` properties.
    pub allow_unset: bool,
    /// Rewrite `branch` to the submodule's checked-out branch when it is
    /// missing or does not contain the committed submodule commit.
    pub update_gitmodules: bool,
}

/// A single problem with a submodule pointer change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The submodule path has no section in `.gitmodules`.
    Unregistered { path: String },
    /// The submodule's section has no `branch` property.
    BranchUnset { name: String },
    /// The committed submodule commit is not reachable from the declared branch.
    NotOnBranch {
        path: String,
        branch: String,
        commit: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Unregistered { path } => write!(
                f,
                "No submodule `{}` found in `.gitmodules`. This happens when a submodule \
                 is added with `git add` rather than with the `git submodule` command.",
                path
            ),
            Violation::BranchUnset { name } => {
                write!(f, "Property `branch` unset for submodule `{}`.", name)
            }
            Violation::NotOnBranch { path, branch, .. } => write!(
                f,
                "The commit of the submodule `{}` is not part of the configured branch `{}`.",
                path, branch
            ),
        }
    }
}

/// One line of a check report: a counted violation or an uncounted notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Violation(Violation),
    Notice(String),
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Violation(violation) => fmt::Display::fmt(violation, f),
            Finding::Notice(notice) => f.write_str(notice),
        }
    }
}

/// Result of validating one diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Violations and notices, in diff order.
    pub findings: Vec<Finding>,
    /// Rewritten `.gitmodules` text, present only when it changed.
    pub updated_gitmodules: Option<String>,
}

impl ValidationOutcome {
    pub(crate) fn push_violation(&mut self, violation: Violation) {
        self.findings.push(Finding::Violation(violation));
    }

    pub(crate) fn push_notice(&mut self, notice: String) {
        self.findings.push(Finding::Notice(notice));
    }

    /// Counted violations, in diff order.
    pub fn violations(&self) -> Vec<&Violation> {
        self.findings
            .iter()
            .filter_map(|finding| match finding {
                Finding::Violation(violation) => Some(violation),
                Finding::Notice(_) => None,
            })
            .collect()
    }

    /// Informational messages that do not count as violations.
    pub fn notices(&self) -> Vec<&str> {
        self.findings
            .iter()
            .filter_map(|finding| match finding {
                Finding::Notice(notice) => Some(notice.as_str()),
                Finding::Violation(_) => None,
            })
            .collect()
    }

    pub fn violation_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| matches!(finding, Finding::Violation(_)))
            .count()
    }

    pub fn passed(&self) -> bool {
        self.violation_count() == 0
    }

    pub fn gitmodules_changed(&self) -> bool {
        self.updated_gitmodules.is_some()
    }
}
