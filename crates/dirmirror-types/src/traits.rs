//! Core traits for dirmirror operations
//!
//! These are the seams between the merge walk and the outside world: the
//! filesystem primitives it drives and the sink that observes planned copies.

use crate::{CopyProgress, Entry, Result, SyncStats};
use async_trait::async_trait;
use std::path::Path;
use std::time::SystemTime;

/// Filesystem primitives consumed by the merge walk.
///
/// Implementations must map every failure to the matching [`crate::Error`]
/// variant so the caller sees the offending path and its cause.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// List the entries of a directory, in no particular order
    async fn list_directory(&self, path: &Path) -> Result<Vec<Entry>>;

    /// Describe a single path
    async fn stat_file(&self, path: &Path) -> Result<Entry>;

    /// Read the entire contents of a file
    async fn read_file_contents(&self, path: &Path) -> Result<Vec<u8>>;

    /// Create or truncate a file and write `contents` to it
    async fn write_file_contents(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Create a directory; an already existing directory is not an error
    async fn create_directory(&self, path: &Path) -> Result<()>;

    /// Remove a single file
    async fn remove_file(&self, path: &Path) -> Result<()>;

    /// Remove a directory and everything below it
    async fn remove_directory_recursive(&self, path: &Path) -> Result<()>;

    /// Set the modification time of a path
    async fn set_modified(&self, path: &Path, modified: SystemTime) -> Result<()>;
}

/// Trait for reporting progress of the planned copy pass
pub trait ProgressReporter: Send + Sync {
    /// The walk finished and the plan holds `task_count` copies totalling `bytes_planned`
    fn plan_ready(&self, task_count: usize, bytes_planned: u64);

    /// A copy is about to start
    fn copy_started(&self, progress: &CopyProgress<'_>);

    /// A copy finished
    fn copy_finished(&self, progress: &CopyProgress<'_>);

    /// The run completed
    fn completed(&self, stats: &SyncStats);
}

/// Reporter that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn plan_ready(&self, _task_count: usize, _bytes_planned: u64) {}

    fn copy_started(&self, _progress: &CopyProgress<'_>) {}

    fn copy_finished(&self, _progress: &CopyProgress<'_>) {}

    fn completed(&self, _stats: &SyncStats) {}
}
