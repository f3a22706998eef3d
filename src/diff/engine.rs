//! Sync plan type

use crate::types::{Direction, FileEntry, Side};
use crate::Config;
use serde::Serialize;
use std::path::Path;

/// Result of comparing the library and mirror inventories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncPlan {
    /// Count-based synced check
    pub synced: bool,

    /// Which side copies into which
    pub direction: Direction,

    /// Files matched under the library
    pub library_count: usize,

    /// Files matched under the mirror
    pub mirror_count: usize,

    /// Source entries missing from the target (empty when synced)
    pub unsynced: Vec<FileEntry>,
}

impl SyncPlan {
    /// True when there is something to copy
    pub fn has_work(&self) -> bool {
        !self.synced && !self.unsynced.is_empty()
    }

    /// Number of files to copy
    pub fn len(&self) -> usize {
        self.unsynced.len()
    }

    /// Check if the plan copies nothing
    pub fn is_empty(&self) -> bool {
        self.unsynced.is_empty()
    }

    /// Absolute root of the copy source
    pub fn source_root<'a>(&self, config: &'a Config) -> &'a Path {
        side_root(self.direction.source, config)
    }

    /// Absolute root of the copy target
    pub fn target_root<'a>(&self, config: &'a Config) -> &'a Path {
        side_root(self.direction.target, config)
    }

    /// Serialize the plan for `--json`
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn side_root(side: Side, config: &Config) -> &Path {
    match side {
        Side::Library => &config.library,
        Side::Mirror => &config.mirror,
    }
}
