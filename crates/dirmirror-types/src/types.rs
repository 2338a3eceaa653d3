//! Core data types for dirmirror
//!
//! This module provides the values that flow between the merge walk, the
//! identity policies and the copy executor: directory entries, the per-entry
//! decisions, queued copy tasks, run statistics and progress snapshots.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// Unique identifier for a single mirror run
pub type RunId = uuid::Uuid;

/// File size in bytes
pub type FileSize = u64;

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
}

/// One item in a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Name within the parent directory
    pub name: OsString,
    /// File or directory
    pub kind: EntryKind,
    /// Size in bytes (zero for directories on most platforms)
    pub size: FileSize,
    /// Last modification time, when the platform reports one
    pub modified: Option<SystemTime>,
}

impl Entry {
    /// Create a file entry
    pub fn file(name: impl Into<OsString>, size: FileSize) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            size,
            modified: None,
        }
    }

    /// Create a directory entry
    pub fn directory(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
            size: 0,
            modified: None,
        }
    }

    /// Set the modification time
    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Entry name
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Whether this entry is a directory
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Sort a listing ascending by name.
///
/// Names compare byte-wise and case-sensitively, which is the order the
/// merge walk relies on.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Decision produced by one step of the merge walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Source file is missing or different at the destination
    CopyFile {
        /// Source file
        source: PathBuf,
        /// Destination file
        dest: PathBuf,
        /// Source file size
        size: FileSize,
        /// Source modification time
        modified: Option<SystemTime>,
    },
    /// Source directory is missing at the destination
    CreateDirectoryAndRecurse {
        /// Source directory
        source: PathBuf,
        /// Destination directory to create
        dest: PathBuf,
    },
    /// Both sides are already directories
    RecurseExisting {
        /// Source directory
        source: PathBuf,
        /// Destination directory
        dest: PathBuf,
    },
    /// Destination holds a stale file where the source has a directory
    ReplaceFileWithDirectory {
        /// Source directory
        source: PathBuf,
        /// Destination path currently holding a file
        dest: PathBuf,
    },
    /// Destination holds a stale directory where the source has a file
    ReplaceDirectoryWithFile {
        /// Source file
        source: PathBuf,
        /// Destination path currently holding a directory
        dest: PathBuf,
        /// Source file size
        size: FileSize,
        /// Source modification time
        modified: Option<SystemTime>,
    },
    /// File exists only in the destination
    RemoveFile {
        /// Destination file to remove
        dest: PathBuf,
    },
    /// Directory exists only in the destination
    RemoveDirectory {
        /// Destination directory to remove recursively
        dest: PathBuf,
    },
    /// Same-named files judged identical
    Skip {
        /// Destination file left untouched
        dest: PathBuf,
    },
}

impl SyncAction {
    /// Destination path this action touches
    pub fn dest(&self) -> &PathBuf {
        match self {
            Self::CopyFile { dest, .. }
            | Self::CreateDirectoryAndRecurse { dest, .. }
            | Self::RecurseExisting { dest, .. }
            | Self::ReplaceFileWithDirectory { dest, .. }
            | Self::ReplaceDirectoryWithFile { dest, .. }
            | Self::RemoveFile { dest }
            | Self::RemoveDirectory { dest }
            | Self::Skip { dest } => dest,
        }
    }

    /// Short label used in log lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::CopyFile { .. } => "copy",
            Self::CreateDirectoryAndRecurse { .. } => "mkdir",
            Self::RecurseExisting { .. } => "descend",
            Self::ReplaceFileWithDirectory { .. } => "replace file with directory",
            Self::ReplaceDirectoryWithFile { .. } => "replace directory with file",
            Self::RemoveFile { .. } => "remove file",
            Self::RemoveDirectory { .. } => "remove directory",
            Self::Skip { .. } => "skip",
        }
    }
}

/// A copy queued by the planned execution strategy
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CopyTask {
    /// Source file
    pub source: PathBuf,
    /// Destination file
    pub dest: PathBuf,
    /// Source size at the time the task was queued
    pub size: FileSize,
    /// Source modification time, used for best-effort timestamp preservation
    #[cfg_attr(feature = "serde", serde(skip))]
    pub modified: Option<SystemTime>,
}

impl CopyTask {
    /// Create a new copy task
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>, size: FileSize) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            size,
            modified: None,
        }
    }

    /// Attach the source modification time
    pub fn with_modified(mut self, modified: Option<SystemTime>) -> Self {
        self.modified = modified;
        self
    }
}

/// How copy decisions are executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ExecutionStrategy {
    /// Copy each file as soon as the walk decides to
    #[default]
    Immediate,
    /// Queue copies and run them after the walk, with progress reporting
    Planned,
}

/// Which identity policy decides whether two same-named files match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum IdentityKind {
    /// Equal size means identical
    #[default]
    Size,
    /// Equal size and equal modification time
    SizeAndMtime,
    /// Equal size and equal content digest
    ContentHash,
}

/// Statistics for one mirror run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SyncStats {
    /// Number of files copied
    pub files_copied: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Number of files judged identical and skipped
    pub files_skipped: u64,
    /// Number of directories created
    pub directories_created: u64,
    /// Number of destination-only files removed
    pub files_removed: u64,
    /// Number of destination-only directories removed
    pub directories_removed: u64,
    /// Number of entries whose type changed between file and directory
    pub entries_replaced: u64,
    /// Total duration of the run
    pub duration: Duration,
}

impl SyncStats {
    /// Create a new empty statistics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the run changed anything at the destination
    pub fn is_noop(&self) -> bool {
        self.files_copied == 0
            && self.directories_created == 0
            && self.files_removed == 0
            && self.directories_removed == 0
            && self.entries_replaced == 0
    }

    /// Calculate the overall transfer rate in bytes per second
    pub fn transfer_rate(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.bytes_copied as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Progress snapshot emitted around each planned copy
#[derive(Debug, Clone)]
pub struct CopyProgress<'a> {
    /// Task about to be (or just) copied
    pub task: &'a CopyTask,
    /// One-based position of the task in the plan
    pub task_number: usize,
    /// Number of tasks in the plan
    pub task_count: usize,
    /// Bytes copied so far
    pub bytes_copied: u64,
    /// Bytes planned for the whole run
    pub bytes_planned: u64,
}

impl CopyProgress<'_> {
    /// Overall progress percentage
    pub fn percentage(&self) -> f64 {
        if self.bytes_planned > 0 {
            (self.bytes_copied as f64 / self.bytes_planned as f64) * 100.0
        } else {
            100.0
        }
    }
}
