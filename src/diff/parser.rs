//! Core raw diff parsing logic.

use crate::error::{CheckError, Result};
use std::iter::Enumerate;
use std::str::Lines;

use super::record::{ChangeStatus, DiffEntry, FileMode};

/// Lazy iterator over the records of `git diff --raw` output.
///
/// Yields one `Result` per non-blank line; a malformed record yields
/// `CheckError::DiffFormat` and the caller decides whether to stop.
#[derive(Debug, Clone)]
pub struct RawDiffRecords<'a> {
    lines: Enumerate<Lines<'a>>,
}

impl Iterator for RawDiffRecords<'_> {
    type Item = Result<DiffEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, line) in self.lines.by_ref() {
            if line.trim().is_empty() {
                continue;
            }
            return Some(parse_record(line).map_err(|reason| {
                CheckError::DiffFormat(format!("line {}: {}: '{}'", index + 1, reason, line))
            }));
        }
        None
    }
}

/// Parse raw diff output into a lazy sequence of entries.
///
/// Record format:
/// `:<src mode> <dst mode> <src id> <dst id> <status>[score]\t<src path>[\t<dst path>]`
///
/// # Example
///
/// ```text
/// :000000 160000 0000000000000000000000000000000000000000 4b825dc642cb6eb9a060e54bf8d69288fbee4904 A\tvendor/lib
/// ```
pub fn parse_raw_diff(diff_output: &str) -> RawDiffRecords<'_> {
    RawDiffRecords {
        lines: diff_output.lines().enumerate(),
    }
}

fn parse_record(line: &str) -> std::result::Result<DiffEntry, String> {
    let (meta, paths) = line
        .split_once('\t')
        .ok_or_else(|| "record has no path field".to_string())?;

    let tokens: Vec<&str> = meta.split_whitespace().collect();
    let [src_mode, dst_mode, src_id, dst_id, status] = tokens.as_slice() else {
        return Err(format!(
            "expected 5 mode/id/status fields, found {}",
            tokens.len()
        ));
    };

    let src_mode = parse_mode(src_mode.trim_start_matches(':'))?;
    let dst_mode = parse_mode(dst_mode)?;
    let (status, score) = parse_status(status)?;

    let mut path_fields = paths.split('\t');
    let src_path = path_fields
        .next()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| "empty source path".to_string())?;
    let dst_path = path_fields.next().filter(|p| !p.is_empty());
    if path_fields.next().is_some() {
        return Err("more than two path fields".to_string());
    }

    Ok(DiffEntry {
        src_mode,
        dst_mode,
        src_id: src_id.to_string(),
        dst_id: dst_id.to_string(),
        status,
        score,
        src_path: src_path.to_string(),
        dst_path: dst_path.map(str::to_string),
    })
}

fn parse_mode(text: &str) -> std::result::Result<FileMode, String> {
    FileMode::from_octal(text).ok_or_else(|| format!("invalid file mode '{}'", text))
}

/// Split a status token such as `R086` into the status and its score.
fn parse_status(token: &str) -> std::result::Result<(ChangeStatus, Option<u32>), String> {
    let mut chars = token.chars();
    let code = chars
        .next()
        .ok_or_else(|| "empty status".to_string())?;
    let status =
        ChangeStatus::from_code(code).ok_or_else(|| format!("unknown status '{}'", code))?;

    let rest = chars.as_str();
    let score = if rest.is_empty() {
        None
    } else {
        Some(
            rest.parse::<u32>()
                .map_err(|_| format!("invalid status score '{}'", rest))?,
        )
    };

    Ok((status, score))
}
