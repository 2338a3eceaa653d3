//! Core type system and error handling for dirmirror
//!
//! This crate provides the foundational types, error handling, and collaborator
//! traits shared by the dirmirror crates. It includes:
//!
//! - **Error handling**: one error variant per failing filesystem primitive, each
//!   carrying the offending path and the underlying cause
//! - **Core types**: directory entries, merge decisions, copy tasks, run statistics
//! - **Traits**: the async [`FileSystem`] seam and the [`ProgressReporter`] sink
//!
//! # Features
//!
//! - `serde`: Enable serialization support for configuration-facing types
//!
//! # Examples
//!
//! ```rust
//! use dirmirror_types::{sort_entries, Entry};
//!
//! let mut listing = vec![Entry::file("b.txt", 3), Entry::directory("a")];
//! sort_entries(&mut listing);
//! assert_eq!(listing[0].name, "a");
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod result;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
pub use result::Result;
pub use traits::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_creation() {
        let stats = SyncStats::new();
        assert_eq!(stats.files_copied, 0);
        assert_eq!(stats.bytes_copied, 0);
        assert_eq!(stats.transfer_rate(), 0.0);
    }

    #[test]
    fn test_entry_constructors() {
        let file = Entry::file("a.txt", 5);
        assert!(!file.is_dir());
        assert_eq!(file.size, 5);

        let dir = Entry::directory("sub");
        assert!(dir.is_dir());
        assert_eq!(dir.name(), "sub");
    }

    #[test]
    fn test_default_choices() {
        assert_eq!(ExecutionStrategy::default(), ExecutionStrategy::Immediate);
        assert_eq!(IdentityKind::default(), IdentityKind::Size);
    }

    #[test]
    fn test_noop_reporter_accepts_events() {
        let reporter = NoopReporter;
        let task = CopyTask::new("a", "b", 1);
        reporter.plan_ready(1, 1);
        reporter.copy_started(&CopyProgress {
            task: &task,
            task_number: 1,
            task_count: 1,
            bytes_copied: 0,
            bytes_planned: 1,
        });
        reporter.completed(&SyncStats::new());
    }
}
