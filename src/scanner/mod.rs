//! Directory scanning logic

mod filter;
mod walker;

pub use filter::ExtensionFilter;
pub use walker::{scan_directory, ProgressCallback};
