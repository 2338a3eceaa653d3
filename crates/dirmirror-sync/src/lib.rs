//! One-way directory mirroring for dirmirror
//!
//! This crate makes a destination tree match a source tree:
//!
//! - **Merge walk**: both listings are sorted by name and walked together with
//!   two cursors, so each name is classified as source-only, destination-only
//!   or present on both sides in a single pass
//! - **Identity policies**: a replaceable rule decides when two same-named
//!   files need no copy (size only by default)
//! - **Copy strategies**: copy as the walk goes, or plan every copy first and
//!   run the plan with progress reporting
//!
//! Files and directories that exist only in the destination are deleted.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dirmirror_sync::{SyncEngine, SyncOptions, SyncRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = SyncEngine::with_options(SyncOptions::planned());
//! let report = engine.sync(SyncRequest::new("source_dir", "dest_dir")).await?;
//! println!(
//!     "Copied {} files, {} bytes",
//!     report.stats.files_copied, report.stats.bytes_copied
//! );
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod engine;
pub mod executor;
pub mod identity;
pub mod merge;
pub mod progress;

pub use engine::{SyncEngine, SyncOptions, SyncReport, SyncRequest};
pub use executor::{CopyExecutor, CopyPlan, RunContext};
pub use identity::{
    policy_for, ContentHashIdentity, FilePair, IdentityPolicy, SizeAndMtimeIdentity, SizeIdentity,
};
pub use merge::{MergeStep, MergeWalk};
pub use progress::{format_bytes, format_duration, ChannelReporter, LogReporter, ProgressEvent};

use dirmirror_types::Result;
use std::path::Path;

/// Mirror `source` into `destination` with default options
pub async fn mirror<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
) -> Result<SyncReport> {
    SyncEngine::new()
        .sync(SyncRequest::new(source, destination))
        .await
}
