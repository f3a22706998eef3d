//! # musync - Music library / removable-disk mirror sync
//!
//! Scans a music library and its mirror on a removable disk, lists the
//! tracks present on one side only, and copies them across.
//!
//! Comparison is by relative path; the side holding more tracks is the
//! copy source for a cycle.

// Module declarations
pub mod config;
pub mod scanner;
pub mod diff;
pub mod executor;
pub mod logging;
pub mod ui;
pub mod commands;
pub mod types;

// Re-export commonly used types
pub use types::{Direction, FileEntry, Inventory, Side, SyncError, UnsyncedFile};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
