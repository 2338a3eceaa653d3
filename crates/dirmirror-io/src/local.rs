//! `tokio::fs` implementation of the filesystem primitives

use async_trait::async_trait;
use dirmirror_types::{Entry, EntryKind, Error, FileSystem, Result};
use std::fs::Metadata;
use std::io;
use std::path::Path;
use std::time::SystemTime;
use tokio::fs;
use tracing::{debug, trace};

/// Filesystem primitives backed by the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Create a new local filesystem adapter
    pub fn new() -> Self {
        Self
    }

    /// Metadata for a path, following symlinks when the target exists.
    ///
    /// A dangling symlink is described by the link itself.
    async fn metadata(path: &Path) -> io::Result<Metadata> {
        match fs::metadata(path).await {
            Ok(metadata) => Ok(metadata),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let metadata = fs::symlink_metadata(path).await?;
                debug!("Dangling symlink treated as a file: {}", path.display());
                Ok(metadata)
            }
            Err(e) => Err(e),
        }
    }

    fn entry_from_metadata(name: std::ffi::OsString, metadata: &Metadata) -> Entry {
        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        Entry {
            name,
            kind,
            size: if metadata.is_dir() { 0 } else { metadata.len() },
            modified: metadata.modified().ok(),
        }
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn list_directory(&self, path: &Path) -> Result<Vec<Entry>> {
        let mut reader = fs::read_dir(path)
            .await
            .map_err(|e| Error::directory_unreadable(path, e))?;

        let mut entries = Vec::new();
        while let Some(dir_entry) = reader
            .next_entry()
            .await
            .map_err(|e| Error::directory_unreadable(path, e))?
        {
            let entry_path = dir_entry.path();
            let metadata = Self::metadata(&entry_path)
                .await
                .map_err(|e| Error::path_unreadable(&entry_path, e))?;
            entries.push(Self::entry_from_metadata(dir_entry.file_name(), &metadata));
        }

        trace!("Listed {} entries in '{}'", entries.len(), path.display());
        Ok(entries)
    }

    async fn stat_file(&self, path: &Path) -> Result<Entry> {
        let metadata = Self::metadata(path)
            .await
            .map_err(|e| Error::path_unreadable(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| path.as_os_str().to_os_string());

        Ok(Self::entry_from_metadata(name, &metadata))
    }

    async fn read_file_contents(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).await.map_err(|e| Error::read_failure(path, e))
    }

    async fn write_file_contents(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents)
            .await
            .map_err(|e| Error::write_failure(path, e))
    }

    async fn create_directory(&self, path: &Path) -> Result<()> {
        match fs::create_dir(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                // Only an existing directory satisfies the request
                match fs::metadata(path).await {
                    Ok(metadata) if metadata.is_dir() => Ok(()),
                    _ => Err(Error::create_failure(path, e)),
                }
            }
            Err(e) => Err(Error::create_failure(path, e)),
        }
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)
            .await
            .map_err(|e| Error::remove_failure(path, e))
    }

    async fn remove_directory_recursive(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path)
            .await
            .map_err(|e| Error::remove_failure(path, e))
    }

    async fn set_modified(&self, path: &Path, modified: SystemTime) -> Result<()> {
        filetime::set_file_mtime(path, filetime::FileTime::from_system_time(modified))
            .map_err(|e| Error::write_failure(path, e))
    }
}
