//! Configuration management

mod file;

pub use file::FileConfig;

use crate::types::SyncError;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Extensions matched when none are configured
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp3", "wav", "flac"];

/// Command-line arguments
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "musync",
    version,
    about = "Find tracks missing between a music library and its removable-disk mirror, and copy them across"
)]
pub struct Cli {
    /// Primary music library
    #[arg(short, long, value_name = "DIR")]
    pub library: Option<PathBuf>,

    /// Removable-disk mirror of the library
    #[arg(short, long, value_name = "DIR")]
    pub mirror: Option<PathBuf>,

    /// File extension to include (repeatable, case-insensitive, default: mp3 wav flac)
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Read library, mirror and extensions from a TOML file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Answer yes to every prompt (one verification rescan after copying)
    #[arg(short, long)]
    pub yes: bool,

    /// Show what is unsynced, copy nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Print the unsynced report as JSON (implies --dry-run)
    #[arg(long)]
    pub json: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Configuration for a sync run, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Primary music library
    pub library: PathBuf,

    /// Removable-disk mirror
    pub mirror: PathBuf,

    /// Allow-list of extensions, lowercase without the leading dot
    pub extensions: Vec<String>,

    /// Dry run (show plan, don't copy)
    pub dry_run: bool,

    /// Emit the report as JSON
    pub json: bool,

    /// Answer yes to prompts
    pub assume_yes: bool,

    /// Log verbosity from -v flags, read when logging is initialised
    pub verbose: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library: PathBuf::new(),
            mirror: PathBuf::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            dry_run: false,
            json: false,
            assume_yes: false,
            verbose: 0,
        }
    }
}

impl Config {
    /// Build a config for two roots with default settings
    pub fn new(library: impl Into<PathBuf>, mirror: impl Into<PathBuf>) -> Self {
        Self {
            library: library.into(),
            mirror: mirror.into(),
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.library.as_os_str().is_empty() {
            return Err(SyncError::Config(
                "No library directory given (use --library or the config file)".to_string(),
            ));
        }
        if self.mirror.as_os_str().is_empty() {
            return Err(SyncError::Config(
                "No mirror directory given (use --mirror or the config file)".to_string(),
            ));
        }
        if self.library == self.mirror {
            return Err(SyncError::Config(
                "Library and mirror cannot be the same directory".to_string(),
            ));
        }
        // A nested root would show up in the other root's inventory
        if self.mirror.starts_with(&self.library) || self.library.starts_with(&self.mirror) {
            return Err(SyncError::Config(format!(
                "Library and mirror cannot be nested: \"{}\" and \"{}\"",
                self.library.display(),
                self.mirror.display()
            )));
        }
        if self.extensions.is_empty() {
            return Err(SyncError::Config(
                "Extension allow-list is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Both roots must exist before a cycle starts
    pub fn ensure_roots_exist(&self) -> Result<(), SyncError> {
        for root in [&self.library, &self.mirror] {
            if !root.exists() {
                return Err(SyncError::PathNotFound { path: root.clone() });
            }
        }
        Ok(())
    }
}

impl TryFrom<Cli> for Config {
    type Error = SyncError;

    /// Merge CLI flags over the optional config file, then validate
    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let raw_extensions = if !cli.extensions.is_empty() {
            cli.extensions
        } else if let Some(exts) = file.extensions {
            exts
        } else {
            DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
        };

        let config = Config {
            library: cli.library.or(file.library).unwrap_or_default(),
            mirror: cli.mirror.or(file.mirror).unwrap_or_default(),
            extensions: normalize_extensions(&raw_extensions)?,
            dry_run: cli.dry_run || cli.json,
            json: cli.json,
            assume_yes: cli.yes,
            verbose: cli.verbose,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Lowercase, strip leading dots, drop duplicates (first occurrence wins)
pub fn normalize_extensions(raw: &[String]) -> Result<Vec<String>, SyncError> {
    let mut normalized: Vec<String> = Vec::with_capacity(raw.len());
    for ext in raw {
        let clean = ext.trim().trim_start_matches('.').to_lowercase();
        if clean.is_empty() {
            return Err(SyncError::Config(format!("Invalid extension '{}'", ext)));
        }
        if !normalized.contains(&clean) {
            normalized.push(clean);
        }
    }
    Ok(normalized)
}
