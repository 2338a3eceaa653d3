//! Local filesystem primitives for dirmirror
//!
//! This crate implements the [`dirmirror_types::FileSystem`] collaborator over
//! `tokio::fs`. Every primitive is a thin wrapper that maps the I/O failure to
//! the matching error variant, so the merge walk can report which path failed
//! and why.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dirmirror_io::LocalFileSystem;
//! use dirmirror_types::FileSystem;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fs = LocalFileSystem::new();
//! for entry in fs.list_directory(Path::new("source_dir")).await? {
//!     println!("{:?} ({} bytes)", entry.name, entry.size);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod local;

pub use local::LocalFileSystem;
