//! Inventory - The extension-matching files found under one root

use super::FileEntry;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Files found under a single root, in traversal order
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    /// Root the entries are relative to
    pub root_path: PathBuf,

    /// Matched files in the order the walker produced them
    pub entries: Vec<FileEntry>,

    /// Scan metadata
    pub total_dirs: usize,
    pub scan_duration: Duration,
}

impl Inventory {
    /// Create a new empty Inventory
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            entries: Vec::new(),
            total_dirs: 0,
            scan_duration: Duration::from_secs(0),
        }
    }

    /// Build an inventory from relative paths (fixtures and tests)
    pub fn from_paths<I, P>(root_path: impl Into<PathBuf>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut inventory = Self::new(root_path.into());
        for path in paths {
            inventory.push(FileEntry::new(path));
        }
        inventory
    }

    /// Append an entry
    pub fn push(&mut self, entry: FileEntry) {
        self.entries.push(entry);
    }

    /// Number of matched files
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing matched
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterator over all entries
    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }

    /// Relative paths as a set, for order-independent comparisons
    pub fn path_set(&self) -> HashSet<&Path> {
        self.entries.iter().map(|entry| entry.path.as_path()).collect()
    }

    /// Set the scan duration after scanning completes
    pub fn set_scan_duration(&mut self, duration: Duration) {
        self.scan_duration = duration;
    }

    /// Increment the directory counter
    pub fn increment_dirs(&mut self) {
        self.total_dirs += 1;
    }
}
