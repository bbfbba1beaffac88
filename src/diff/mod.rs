//! Raw diff parsing for check-submodule-branch.
//!
//! Parses the output of `git diff --raw` into [`DiffEntry`] values. Each
//! record carries both file modes, both object ids, a status letter with an
//! optional similarity score, and one or two paths:
//! - Source mode has a leading `:` which is stripped
//! - Copies and renames (`C`, `R`) have a score and a destination path
//! - Destination mode `160000` marks a submodule pointer

mod parser;
mod record;


pub use parser::{RawDiffRecords, parse_raw_diff};
pub use record::{ChangeStatus, DiffEntry, FileMode};
