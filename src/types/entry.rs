//! FileEntry - A single track found under a sync root

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A file identified by its path relative to the scanned root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FileEntry {
    /// Relative path from sync root
    pub path: PathBuf,
}

impl FileEntry {
    /// Create a new FileEntry from a root-relative path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Final path component, used when reporting a file by name
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// A FileEntry resolved against both roots, ready to be copied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsyncedFile {
    /// Relative path shared by source and destination
    pub entry: FileEntry,

    /// Absolute path of the existing file
    pub source: PathBuf,

    /// Absolute path the file will be copied to
    pub destination: PathBuf,

    /// Size of the source file in bytes
    pub size: u64,
}

impl UnsyncedFile {
    /// Resolve `entry` under `source_root` and `target_root`, reading the source size
    pub fn resolve(
        entry: &FileEntry,
        source_root: &Path,
        target_root: &Path,
    ) -> std::io::Result<Self> {
        let source = source_root.join(&entry.path);
        let destination = target_root.join(&entry.path);
        let size = std::fs::metadata(&source)?.len();

        Ok(Self {
            entry: entry.clone(),
            source,
            destination,
            size,
        })
    }
}
