//! Error types and handling for dirmirror
//!
//! Every failure a mirror run can hit originates in one of the filesystem
//! collaborators, so each variant carries the offending path and the
//! underlying I/O cause. All of them are fatal: the merge walk propagates
//! the first error it sees and the caller decides how to report it.

use std::path::{Path, PathBuf};

/// Main error type for dirmirror operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A directory listing could not be read
    #[error("Failed to read directory '{}': {source}", .path.display())]
    DirectoryUnreadable {
        /// Directory that could not be listed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Metadata for a path could not be read
    #[error("Failed to get metadata for '{}': {source}", .path.display())]
    PathUnreadable {
        /// Path whose metadata could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// File contents could not be read
    #[error("Failed to read file '{}': {source}", .path.display())]
    ReadFailure {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// File contents or metadata could not be written
    #[error("Failed to write '{}': {source}", .path.display())]
    WriteFailure {
        /// File that could not be written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A directory could not be created
    #[error("Failed to create directory '{}': {source}", .path.display())]
    CreateFailure {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A file or directory could not be removed
    #[error("Failed to remove '{}': {source}", .path.display())]
    RemoveFailure {
        /// Path that could not be removed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Directory listing failed
    DirectoryUnreadable,
    /// Metadata lookup failed
    PathUnreadable,
    /// Reading file contents failed
    ReadFailure,
    /// Writing file contents failed
    WriteFailure,
    /// Directory creation failed
    CreateFailure,
    /// Removal failed
    RemoveFailure,
    /// Configuration errors
    Config,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DirectoryUnreadable { .. } => ErrorKind::DirectoryUnreadable,
            Self::PathUnreadable { .. } => ErrorKind::PathUnreadable,
            Self::ReadFailure { .. } => ErrorKind::ReadFailure,
            Self::WriteFailure { .. } => ErrorKind::WriteFailure,
            Self::CreateFailure { .. } => ErrorKind::CreateFailure,
            Self::RemoveFailure { .. } => ErrorKind::RemoveFailure,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// Path the failing operation was acting on, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::DirectoryUnreadable { path, .. }
            | Self::PathUnreadable { path, .. }
            | Self::ReadFailure { path, .. }
            | Self::WriteFailure { path, .. }
            | Self::CreateFailure { path, .. }
            | Self::RemoveFailure { path, .. } => Some(path),
            Self::Config { .. } => None,
        }
    }

    /// Create a directory listing error
    pub fn directory_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Create a metadata error
    pub fn path_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PathUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Create a read error
    pub fn read_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFailure {
            path: path.into(),
            source,
        }
    }

    /// Create a write error
    pub fn write_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailure {
            path: path.into(),
            source,
        }
    }

    /// Create a directory creation error
    pub fn create_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateFailure {
            path: path.into(),
            source,
        }
    }

    /// Create a removal error
    pub fn remove_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::RemoveFailure {
            path: path.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
