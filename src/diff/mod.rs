//! Set differencer - Synced check and plan generation

mod compare;
mod engine;
mod plan;

pub use compare::{is_synced, unsynced_files};
pub use engine::SyncPlan;
pub use plan::build_sync_plan;
