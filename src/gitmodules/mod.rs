//! `.gitmodules` parsing and editing.
//!
//! The file is INI-like: `[submodule "<name>"]` headers followed by
//! indented `key = value` lines. Parsing produces a [`ConfigurationIndex`]
//! of submodule name to properties; editing goes through
//! [`GitmodulesDocument`], which re-renders the text with every untouched
//! line preserved verbatim.

mod document;
mod index;


pub use document::GitmodulesDocument;
pub use index::{ConfigurationIndex, SubmoduleProperties};

use crate::error::Result;

/// Default location of the submodule configuration, relative to the
/// repository root.
pub const GITMODULES_FILE: &str = ".gitmodules";

/// Parse `.gitmodules` text into a name-to-properties index.
///
/// # Errors
///
/// * `CheckError::MalformedConfig` - property outside any section, empty
///   section name, or empty key
pub fn parse_gitmodules(text: &str) -> Result<ConfigurationIndex> {
    Ok(GitmodulesDocument::parse(text)?.index())
}

/// Return `text` with the `branch` of submodule `name` set to `new_branch`.
///
/// Text is returned unchanged when the branch already has that value or no
/// section is named `name`.
pub fn set_branch(text: &str, name: &str, new_branch: &str) -> Result<String> {
    let mut document = GitmodulesDocument::parse(text)?;
    if document.set_branch(name, new_branch) {
        Ok(document.render())
    } else {
        Ok(text.to_string())
    }
}
