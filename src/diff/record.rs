//! Types describing one `git diff --raw` record.

use std::fmt;

/// A git tree-entry mode, as printed in octal by `git diff --raw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileMode(pub u32);

impl FileMode {
    /// Mode recorded for a gitlink, i.e. a submodule pointer.
    pub const SUBMODULE: FileMode = FileMode(0o160000);

    /// Mode printed for the missing side of an addition or deletion.
    pub const ABSENT: FileMode = FileMode(0);

    /// Parse an octal mode string such as `100644`.
    pub fn from_octal(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        u32::from_str_radix(text, 8).ok().map(FileMode)
    }

    pub fn is_submodule(self) -> bool {
        self == Self::SUBMODULE
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06o}", self.0)
    }
}

/// Change status letter of a raw diff record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeStatus {
    Added,
    Copied,
    Deleted,
    Modified,
    Renamed,
    TypeChanged,
    Unmerged,
    Unknown,
    PairingBroken,
}

impl ChangeStatus {
    /// Map git's status letter to a status.
    pub fn from_code(code: char) -> Option<Self> {
        let status = match code {
            'A' => ChangeStatus::Added,
            'C' => ChangeStatus::Copied,
            'D' => ChangeStatus::Deleted,
            'M' => ChangeStatus::Modified,
            'R' => ChangeStatus::Renamed,
            'T' => ChangeStatus::TypeChanged,
            'U' => ChangeStatus::Unmerged,
            'X' => ChangeStatus::Unknown,
            'B' => ChangeStatus::PairingBroken,
            _ => return None,
        };
        Some(status)
    }

    pub fn code(self) -> char {
        match self {
            ChangeStatus::Added => 'A',
            ChangeStatus::Copied => 'C',
            ChangeStatus::Deleted => 'D',
            ChangeStatus::Modified => 'M',
            ChangeStatus::Renamed => 'R',
            ChangeStatus::TypeChanged => 'T',
            ChangeStatus::Unmerged => 'U',
            ChangeStatus::Unknown => 'X',
            ChangeStatus::PairingBroken => 'B',
        }
    }

    /// Copies and renames carry a score and a destination path.
    pub fn is_copy_or_rename(self) -> bool {
        matches!(self, ChangeStatus::Copied | ChangeStatus::Renamed)
    }
}

/// One changed path between two tree states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub src_mode: FileMode,
    pub dst_mode: FileMode,
    pub src_id: String,
    pub dst_id: String,
    pub status: ChangeStatus,
    /// Similarity score in percent (copy/rename only).
    pub score: Option<u32>,
    pub src_path: String,
    /// Destination path (copy/rename only).
    pub dst_path: Option<String>,
}

impl DiffEntry {
    /// True when the destination is a submodule pointer.
    pub fn is_submodule(&self) -> bool {
        self.dst_mode.is_submodule()
    }

    /// The path the change lands on: the destination of a copy or rename,
    /// the source path otherwise.
    pub fn effective_path(&self) -> &str {
        match &self.dst_path {
            Some(dst) if self.status.is_copy_or_rename() => dst,
            _ => &self.src_path,
        }
    }
}
