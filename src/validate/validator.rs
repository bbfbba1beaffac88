//! Core validation logic for submodule pointer changes.

use crate::diff::DiffEntry;
use crate::error::Result;
use crate::gitmodules::{ConfigurationIndex, GitmodulesDocument};
use crate::vcs::{DETACHED_HEAD, Vcs, listing_contains_branch};
use std::path::Path;
use tracing::{debug, info};

use super::types::{ValidationOptions, ValidationOutcome, Violation};

/// Checks submodule pointer changes against the branches declared in
/// `.gitmodules`.
pub struct BranchValidator<'a, V: Vcs + ?Sized> {
    vcs: &'a V,
    repo_root: &'a Path,
    options: ValidationOptions,
}

/// Mutable state carried across the entries of one run.
struct RunState {
    outcome: ValidationOutcome,
    rewritten: Option<GitmodulesDocument>,
    changed: bool,
}

impl<'a, V: Vcs + ?Sized> BranchValidator<'a, V> {
    /// Create a validator whose submodule checkouts live under `repo_root`.
    pub fn new(vcs: &'a V, repo_root: &'a Path, options: ValidationOptions) -> Self {
        Self {
            vcs,
            repo_root,
            options,
        }
    }

    /// Validate every submodule entry of `entries`, in order.
    ///
    /// `gitmodules` is `None` when the repository has no `.gitmodules`;
    /// every submodule is then unregistered. Entries that are not
    /// submodule pointers are skipped. Lookups always use the index of the
    /// original document, while corrections accumulate in a copy that is
    /// returned in [`ValidationOutcome::updated_gitmodules`].
    ///
    /// # Errors
    ///
    /// The first malformed diff record or failed VCS query aborts the run.
    pub fn validate<I>(
        &self,
        gitmodules: Option<&GitmodulesDocument>,
        entries: I,
    ) -> Result<ValidationOutcome>
    where
        I: IntoIterator<Item = Result<DiffEntry>>,
    {
        let index = gitmodules
            .map(GitmodulesDocument::index)
            .unwrap_or_default();
        let mut state = RunState {
            outcome: ValidationOutcome::default(),
            rewritten: gitmodules.cloned(),
            changed: false,
        };

        for entry in entries {
            let entry = entry?;
            if !entry.is_submodule() {
                continue;
            }
            self.check_entry(&entry, &index, &mut state)?;
        }

        let mut outcome = state.outcome;
        if state.changed {
            outcome.updated_gitmodules = state.rewritten.map(|document| document.render());
        }
        Ok(outcome)
    }

    fn check_entry(
        &self,
        entry: &DiffEntry,
        index: &ConfigurationIndex,
        state: &mut RunState,
    ) -> Result<()> {
        let path = entry.effective_path();
        let registered = index.find_by_path(path);
        let declared = registered.and_then(|(_, props)| props.branch());
        let checkout = self.repo_root.join(path);
        debug!(
            path,
            commit = %entry.dst_id,
            name = ?registered.map(|(name, _)| name),
            branch = ?declared,
            "checking submodule"
        );

        if !self.options.allow_unset {
            match registered {
                None => state.outcome.push_violation(Violation::Unregistered {
                    path: path.to_string(),
                }),
                Some((name, _)) if declared.is_none() => {
                    state.outcome.push_violation(Violation::BranchUnset {
                        name: name.to_string(),
                    })
                }
                Some(_) => {}
            }
        }

        let needs_update = match declared {
            Some(branch) => {
                let listing = self
                    .vcs
                    .branch_contains(branch, &entry.dst_id, &checkout)?;
                let reachable = listing_contains_branch(&listing, branch);
                if !reachable {
                    state.outcome.push_violation(Violation::NotOnBranch {
                        path: path.to_string(),
                        branch: branch.to_string(),
                        commit: entry.dst_id.clone(),
                    });
                }
                !reachable
            }
            None => true,
        };

        if !(self.options.update_gitmodules && needs_update) {
            return Ok(());
        }

        let current = self.vcs.current_branch_name(&checkout)?;
        // Unregistered submodules are named by path; there is no section to rewrite.
        let name = registered.map_or(path, |(name, _)| name);
        if current == DETACHED_HEAD {
            if declared.is_none() && !self.options.allow_unset {
                state.outcome.push_notice(format!(
                    "Submodule `{}` has a detached HEAD unable to retrieve branch name \
                     to update `.gitmodules` file.",
                    name
                ));
            }
        } else if registered.is_some()
            && let Some(document) = state.rewritten.as_mut()
            && document.set_branch(name, &current)
        {
            info!(submodule = name, branch = %current, "updated branch in .gitmodules");
            state.changed = true;
        }

        Ok(())
    }
}
