//! Sync plan generation

use crate::diff::{is_synced, unsynced_files, SyncPlan};
use crate::types::{Direction, Inventory};

/// Compare the library and mirror inventories and decide what to copy
///
/// Equal counts mean synced and nothing is listed, even when the paths
/// differ. Otherwise the larger inventory is the source and every source
/// path absent from the target is listed.
///
/// # Example
/// ```
/// use musync::diff::build_sync_plan;
/// use musync::types::{Direction, Inventory};
///
/// let library = Inventory::from_paths("/music", ["a.mp3", "b.flac", "c.mp3"]);
/// let mirror = Inventory::from_paths("/usb", ["a.mp3"]);
///
/// let plan = build_sync_plan(&library, &mirror);
/// assert!(!plan.synced);
/// assert_eq!(plan.direction, Direction::LIBRARY_TO_MIRROR);
/// assert_eq!(plan.unsynced.len(), 2);
/// ```
pub fn build_sync_plan(library: &Inventory, mirror: &Inventory) -> SyncPlan {
    let direction = Direction::from_counts(library.len(), mirror.len());
    let synced = is_synced(library, mirror);

    let unsynced = if synced {
        Vec::new()
    } else if direction == Direction::LIBRARY_TO_MIRROR {
        unsynced_files(library, mirror)
    } else {
        unsynced_files(mirror, library)
    };

    SyncPlan {
        synced,
        direction,
        library_count: library.len(),
        mirror_count: mirror.len(),
        unsynced,
    }
}
