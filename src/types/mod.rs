//! Core type definitions for musync

mod direction;
mod entry;
mod error;
mod inventory;

pub use direction::{Direction, Side};
pub use entry::{FileEntry, UnsyncedFile};
pub use error::SyncError;
pub use inventory::Inventory;
