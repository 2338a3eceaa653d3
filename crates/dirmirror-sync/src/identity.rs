//! Identity policies for same-named files
//!
//! When the merge walk finds a file with the same name on both sides it asks
//! an [`IdentityPolicy`] whether the destination copy can be kept. The
//! default, [`SizeIdentity`], only compares sizes: two files of equal length
//! but different content are treated as identical and the copy is skipped.
//! Stronger policies trade extra I/O for fewer missed changes.

use async_trait::async_trait;
use dirmirror_types::{Entry, FileSystem, IdentityKind, Result};
use std::fmt;
use std::path::Path;
use tracing::trace;

/// A same-named file pair under comparison
#[derive(Debug, Clone, Copy)]
pub struct FilePair<'a> {
    /// Full path of the source file
    pub source_path: &'a Path,
    /// Listing entry of the source file
    pub source: &'a Entry,
    /// Full path of the destination file
    pub dest_path: &'a Path,
    /// Listing entry of the destination file
    pub dest: &'a Entry,
}

/// Decides whether two same-named files need no copy
#[async_trait]
pub trait IdentityPolicy: fmt::Debug + Send + Sync {
    /// Short policy name for logs
    fn name(&self) -> &'static str;

    /// Whether the destination file can be kept as-is
    async fn identical(&self, fs: &dyn FileSystem, pair: FilePair<'_>) -> Result<bool>;
}

/// Equal size means identical
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeIdentity;

#[async_trait]
impl IdentityPolicy for SizeIdentity {
    fn name(&self) -> &'static str {
        "size"
    }

    async fn identical(&self, _fs: &dyn FileSystem, pair: FilePair<'_>) -> Result<bool> {
        Ok(pair.source.size == pair.dest.size)
    }
}

/// Equal size and equal modification time means identical
///
/// A side without a reported modification time never matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeAndMtimeIdentity;

#[async_trait]
impl IdentityPolicy for SizeAndMtimeIdentity {
    fn name(&self) -> &'static str {
        "size-and-mtime"
    }

    async fn identical(&self, _fs: &dyn FileSystem, pair: FilePair<'_>) -> Result<bool> {
        if pair.source.size != pair.dest.size {
            return Ok(false);
        }

        Ok(match (pair.source.modified, pair.dest.modified) {
            (Some(source), Some(dest)) => source == dest,
            _ => false,
        })
    }
}

/// Equal size and equal BLAKE3 digest means identical
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHashIdentity;

impl ContentHashIdentity {
    async fn digest(fs: &dyn FileSystem, path: &Path) -> Result<blake3::Hash> {
        let contents = fs.read_file_contents(path).await?;
        Ok(blake3::hash(&contents))
    }
}

#[async_trait]
impl IdentityPolicy for ContentHashIdentity {
    fn name(&self) -> &'static str {
        "content-hash"
    }

    async fn identical(&self, fs: &dyn FileSystem, pair: FilePair<'_>) -> Result<bool> {
        if pair.source.size != pair.dest.size {
            return Ok(false);
        }

        let source = Self::digest(fs, pair.source_path).await?;
        let dest = Self::digest(fs, pair.dest_path).await?;
        trace!(
            "Digest {} for '{}', {} for '{}'",
            source.to_hex(),
            pair.source_path.display(),
            dest.to_hex(),
            pair.dest_path.display()
        );

        Ok(source == dest)
    }
}

/// Build the policy selected by configuration
pub fn policy_for(kind: IdentityKind) -> Box<dyn IdentityPolicy> {
    match kind {
        IdentityKind::Size => Box::new(SizeIdentity),
        IdentityKind::SizeAndMtime => Box::new(SizeAndMtimeIdentity),
        IdentityKind::ContentHash => Box::new(ContentHashIdentity),
    }
}
