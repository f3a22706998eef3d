//! Error types for musync

use std::path::PathBuf;
use thiserror::Error;

/// Error types for musync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configured root directory does not exist
    #[error("Path not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    /// A configured root exists but cannot be listed
    #[error("Cannot read {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    /// Copying a single file failed
    #[error("Failed to copy {}: {source} (from {} to {})", path.display(), from.display(), to.display())]
    Copy {
        /// Relative path of the file being copied
        path: PathBuf,
        /// Absolute source path
        from: PathBuf,
        /// Absolute destination path
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// Check if this error should stop the whole run
    ///
    /// A missing or unreadable root and a bad configuration are fatal. Per-file copy failures
    /// never reach the caller of a run, they are counted by the executor.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::PathNotFound { .. } | SyncError::RootUnreadable { .. } | SyncError::Config(_)
        )
    }
}
