//! Line-preserving `.gitmodules` document.
//!
//! The document keeps every line of the source text together with its
//! original terminator, so rendering an unmodified document reproduces the
//! input byte for byte. Edits touch only the targeted line.

use crate::error::{CheckError, Result};
use regex::Regex;
use std::sync::LazyLock;

use super::index::ConfigurationIndex;

static SUBMODULE_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\[submodule\s+"(?P<name>[^"]*)"\]"#).expect("Invalid submodule header regex")
});

const CRLF: &str = "\r\n";
const LF: &str = "\n";

/// What a single line of the document declares.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineKind {
    /// `[submodule "<name>"]`
    SubmoduleHeader(String),
    /// Any other bracketed section header, e.g. `[core]`.
    ForeignHeader,
    /// `key = value`, both sides trimmed.
    Property { key: String, value: String },
    /// Blank lines, comments and fragments without `=`.
    Other,
}

impl LineKind {
    fn is_header(&self) -> bool {
        matches!(self, LineKind::SubmoduleHeader(_) | LineKind::ForeignHeader)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    content: String,
    ending: &'static str,
    kind: LineKind,
}

/// A parsed `.gitmodules` file that can be queried, edited and rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitmodulesDocument {
    lines: Vec<Line>,
    line_ending: &'static str,
}

impl GitmodulesDocument {
    /// Parse `.gitmodules` text.
    ///
    /// # Errors
    ///
    /// * `CheckError::MalformedConfig` - a property line before the first
    ///   submodule header, a submodule header with an empty name, or a
    ///   property with an empty key.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = Vec::new();
        let mut seen_submodule = false;
        let mut crlf_lines = 0usize;
        let mut lf_lines = 0usize;

        for (number, (content, ending)) in split_lines(text).enumerate() {
            let line_number = number + 1;
            match ending {
                CRLF => crlf_lines += 1,
                LF => lf_lines += 1,
                _ => {}
            }

            let kind = classify(content);
            match &kind {
                LineKind::SubmoduleHeader(name) if name.is_empty() => {
                    return Err(CheckError::MalformedConfig(format!(
                        "line {}: submodule section has an empty name",
                        line_number
                    )));
                }
                LineKind::SubmoduleHeader(_) => seen_submodule = true,
                LineKind::ForeignHeader => {}
                LineKind::Property { key, .. } if key.is_empty() => {
                    return Err(CheckError::MalformedConfig(format!(
                        "line {}: property without a key: '{}'",
                        line_number,
                        content.trim()
                    )));
                }
                LineKind::Property { key, .. } if !seen_submodule => {
                    return Err(CheckError::MalformedConfig(format!(
                        "line {}: property '{}' appears before any submodule section header",
                        line_number, key
                    )));
                }
                LineKind::Property { .. } | LineKind::Other => {}
            }

            lines.push(Line {
                content: content.to_string(),
                ending,
                kind,
            });
        }

        let line_ending = if crlf_lines > lf_lines { CRLF } else { LF };
        Ok(Self { lines, line_ending })
    }

    /// Build the name-to-properties index of all submodule sections.
    ///
    /// Properties under foreign sections are not indexed.
    pub fn index(&self) -> ConfigurationIndex {
        let mut index = ConfigurationIndex::new();
        let mut current: Option<&str> = None;

        for line in &self.lines {
            match &line.kind {
                LineKind::SubmoduleHeader(name) => {
                    index.open_section(name);
                    current = Some(name.as_str());
                }
                LineKind::ForeignHeader => current = None,
                LineKind::Property { key, value } => {
                    if let Some(props) = current.and_then(|name| index.section_mut(name)) {
                        props.insert(key.as_str(), value.as_str());
                    }
                }
                LineKind::Other => {}
            }
        }

        index
    }

    /// Set the `branch` property of submodule `name` to `branch`.
    ///
    /// Replaces only the value of an existing `branch` line, or inserts
    /// `\tbranch = <branch>` right after the section header. Returns whether
    /// the document changed; an unknown name or an identical value leaves it
    /// untouched.
    pub fn set_branch(&mut self, name: &str, branch: &str) -> bool {
        let Some(header) = self.lines.iter().rposition(
            |line| matches!(&line.kind, LineKind::SubmoduleHeader(n) if n == name),
        ) else {
            return false;
        };

        let section_end = self.lines[header + 1..]
            .iter()
            .position(|line| line.kind.is_header())
            .map_or(self.lines.len(), |offset| header + 1 + offset);

        let existing = self.lines[header + 1..section_end]
            .iter()
            .rposition(|line| matches!(&line.kind, LineKind::Property { key, .. } if key == "branch"))
            .map(|offset| header + 1 + offset);

        match existing {
            Some(index) => replace_value(&mut self.lines[index], branch),
            None => {
                if self.lines[header].ending.is_empty() {
                    self.lines[header].ending = self.line_ending;
                }
                self.lines.insert(
                    header + 1,
                    Line {
                        content: format!("\tbranch = {}", branch),
                        ending: self.line_ending,
                        kind: LineKind::Property {
                            key: "branch".to_string(),
                            value: branch.to_string(),
                        },
                    },
                );
                true
            }
        }
    }

    /// Render the document back to text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.content);
            out.push_str(line.ending);
        }
        out
    }

    /// The line terminator used for inserted lines.
    pub fn line_ending(&self) -> &'static str {
        self.line_ending
    }
}

/// Split text into `(content, terminator)` pairs, keeping CR-LF and LF apart.
fn split_lines(text: &str) -> impl Iterator<Item = (&str, &'static str)> {
    text.split_inclusive('\n').map(|piece| {
        if let Some(content) = piece.strip_suffix(CRLF) {
            (content, CRLF)
        } else if let Some(content) = piece.strip_suffix(LF) {
            (content, LF)
        } else {
            (piece, "")
        }
    })
}

fn classify(content: &str) -> LineKind {
    let trimmed = content.trim();

    if let Some(caps) = SUBMODULE_HEADER_REGEX.captures(trimmed) {
        return LineKind::SubmoduleHeader(caps["name"].to_string());
    }
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        return LineKind::ForeignHeader;
    }
    if trimmed.starts_with('#') || trimmed.starts_with(';') {
        return LineKind::Other;
    }

    match content.split_once('=') {
        Some((key, value)) => LineKind::Property {
            key: key.trim().to_string(),
            value: value.trim().to_string(),
        },
        None => LineKind::Other,
    }
}

/// Swap the value of a `key = value` line, keeping the text up to and
/// including the whitespace after `=`. A bare `key =` gets one space
/// before the value.
fn replace_value(line: &mut Line, new_value: &str) -> bool {
    if let LineKind::Property { value, .. } = &line.kind
        && value == new_value
    {
        return false;
    }

    let Some(eq) = line.content.find('=') else {
        return false;
    };
    let after = &line.content[eq + 1..];
    let gap = after.len() - after.trim_start().len();
    let prefix_end = eq + 1 + gap;
    let separator = if after.is_empty() { " " } else { "" };

    line.content = format!("{}{}{}", &line.content[..prefix_end], separator, new_value);
    if let LineKind::Property { value, .. } = &mut line.kind {
        *value = new_value.to_string();
    }
    true
}
