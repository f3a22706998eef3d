//! Inventory comparison

use crate::types::{FileEntry, Inventory};
use std::collections::HashSet;
use std::path::Path;

/// Two inventories count as synced when they hold the same number of files
///
/// Only the counts are compared. Two trees with equal counts and different
/// content are reported as synced; `unsynced_files` is the path-level check.
pub fn is_synced(a: &Inventory, b: &Inventory) -> bool {
    a.len() == b.len()
}

/// Entries of `source` whose relative path has no exact match in `target`
///
/// Output keeps `source` order.
pub fn unsynced_files(source: &Inventory, target: &Inventory) -> Vec<FileEntry> {
    let present: HashSet<&Path> = target.path_set();

    source
        .iter()
        .filter(|entry| !present.contains(entry.path.as_path()))
        .cloned()
        .collect()
}
