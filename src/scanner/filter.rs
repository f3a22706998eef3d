//! Extension allow-list

use crate::config::Config;
use crate::types::SyncError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;

const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}', '\\', '/', '!'];

/// Case-insensitive match of a file name against a list of extensions
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    set: GlobSet,
    extensions: Vec<String>,
}

impl ExtensionFilter {
    /// Compile an allow-list. Extensions may carry a leading dot and any case.
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Result<Self, SyncError> {
        if extensions.is_empty() {
            return Err(SyncError::Config(
                "Extension allow-list is empty".to_string(),
            ));
        }

        let mut builder = GlobSetBuilder::new();
        let mut normalized = Vec::with_capacity(extensions.len());

        for ext in extensions {
            let ext = ext.as_ref().trim().trim_start_matches('.').to_lowercase();
            if ext.is_empty() || ext.contains(GLOB_META) {
                return Err(SyncError::Config(format!("Invalid extension '{}'", ext)));
            }

            // `?*` so a bare ".mp3" dotfile has no extension, same as Path::extension
            let glob = GlobBuilder::new(&format!("?*.{}", ext))
                .case_insensitive(true)
                .literal_separator(true)
                .build()
                .map_err(|e| {
                    SyncError::Config(format!("Invalid extension '{}': {}", ext, e))
                })?;
            builder.add(glob);
            normalized.push(ext);
        }

        let set = builder
            .build()
            .map_err(|e| SyncError::Config(format!("Failed to build extension filter: {}", e)))?;

        Ok(Self {
            set,
            extensions: normalized,
        })
    }

    /// Filter for the extensions in `config`
    pub fn from_config(config: &Config) -> Result<Self, SyncError> {
        Self::new(config.extensions.as_slice())
    }

    /// Check the final component of `path` against the allow-list
    pub fn matches(&self, path: &Path) -> bool {
        match path.file_name() {
            Some(name) => self.set.is_match(Path::new(name)),
            None => false,
        }
    }

    /// Extensions in the allow-list, lowercase without the dot
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}
