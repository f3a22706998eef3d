//! TOML configuration file

use crate::types::SyncError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Values that may be set from a `musync.toml` file
///
/// ```toml
/// library = "/home/me/Music"
/// mirror = "/media/usb/Music"
/// extensions = ["mp3", "flac", "wav", "ogg"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub library: Option<PathBuf>,
    pub mirror: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
}

impl FileConfig {
    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            SyncError::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&text).map_err(|e| match e {
            SyncError::Config(msg) => SyncError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(text: &str) -> Result<Self, SyncError> {
        toml::from_str(text).map_err(|e| SyncError::Config(format!("Invalid config: {}", e)))
    }
}
