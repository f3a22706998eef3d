//! Copy executor

pub mod copy;

use crate::diff::SyncPlan;
use crate::types::{FileEntry, SyncError, UnsyncedFile};
use crate::Config;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub use copy::copy_file;

/// Outcome counters for one batch of copies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Number of files in the plan
    pub total_files: usize,
    /// Files copied successfully
    pub copied_files: usize,
    /// Files that failed and were skipped
    pub failed_files: usize,
    /// Bytes written across all successful copies
    pub bytes_copied: u64,
    /// Relative paths of the failed files, in plan order
    pub failed_paths: Vec<PathBuf>,
}

/// Events emitted while executing a plan
#[derive(Debug)]
pub enum ExecutionEvent {
    /// A file is about to be copied
    FileStart {
        index: usize,
        total: usize,
        path: PathBuf,
    },
    /// A file was copied
    FileCopied {
        index: usize,
        total: usize,
        path: PathBuf,
        destination: PathBuf,
        bytes: u64,
        elapsed: Duration,
    },
    /// A file failed; the batch carries on with the next one
    FileFailed {
        index: usize,
        total: usize,
        error: SyncError,
    },
    /// Every file has been attempted
    Complete { stats: ExecutionStats },
}

/// Optional callback used to receive execution events
pub type ExecutionCallback<'a> = dyn Fn(&ExecutionEvent) + 'a;

/// Copy every unsynced file of `plan` from its source root to its target root
///
/// Files are attempted one after another. A failure (missing source,
/// permission denied, disk full, existing destination...) is reported through
/// `on_event` and counted, then the next file is attempted. Nothing is
/// retried.
pub fn execute_plan(
    plan: &SyncPlan,
    config: &Config,
    on_event: Option<&ExecutionCallback<'_>>,
) -> ExecutionStats {
    let source_root = plan.source_root(config);
    let target_root = plan.target_root(config);
    let total = plan.unsynced.len();

    let mut stats = ExecutionStats {
        total_files: total,
        ..Default::default()
    };

    debug!(
        "copying {} file(s) {} ({} -> {})",
        total,
        plan.direction,
        source_root.display(),
        target_root.display()
    );

    for (idx, entry) in plan.unsynced.iter().enumerate() {
        let index = idx + 1;
        emit_event(
            on_event,
            ExecutionEvent::FileStart {
                index,
                total,
                path: entry.path.clone(),
            },
        );

        let started = Instant::now();
        match copy_entry(entry, source_root, target_root) {
            Ok(file) => {
                stats.copied_files += 1;
                stats.bytes_copied += file.size;
                debug!("[{}/{}] copied {}", index, total, entry.path.display());

                emit_event(
                    on_event,
                    ExecutionEvent::FileCopied {
                        index,
                        total,
                        path: entry.path.clone(),
                        destination: file.destination,
                        bytes: file.size,
                        elapsed: started.elapsed(),
                    },
                );
            }
            Err(error) => {
                stats.failed_files += 1;
                stats.failed_paths.push(entry.path.clone());
                warn!("[{}/{}] {}", index, total, error);

                emit_event(
                    on_event,
                    ExecutionEvent::FileFailed {
                        index,
                        total,
                        error,
                    },
                );
            }
        }
    }

    emit_event(
        on_event,
        ExecutionEvent::Complete {
            stats: stats.clone(),
        },
    );

    stats
}

/// Resolve, size and copy one entry; any failure names both paths
fn copy_entry(
    entry: &FileEntry,
    source_root: &Path,
    target_root: &Path,
) -> Result<UnsyncedFile, SyncError> {
    let wrap = |source: std::io::Error| SyncError::Copy {
        path: entry.path.clone(),
        from: source_root.join(&entry.path),
        to: target_root.join(&entry.path),
        source,
    };

    let mut file = UnsyncedFile::resolve(entry, source_root, target_root).map_err(wrap)?;
    // Report what was actually written, the source may have changed since sizing
    file.size = copy_file(&file.source, &file.destination).map_err(wrap)?;
    Ok(file)
}

fn emit_event(on_event: Option<&ExecutionCallback<'_>>, event: ExecutionEvent) {
    if let Some(callback) = on_event {
        callback(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use std::cell::{Cell, RefCell};
    use std::fs;
    use tempfile::TempDir;

    fn plan_for(direction: Direction, paths: &[&str]) -> SyncPlan {
        SyncPlan {
            synced: false,
            direction,
            library_count: paths.len(),
            mirror_count: 0,
            unsynced: paths.iter().map(|p| FileEntry::new(*p)).collect(),
        }
    }

    #[test]
    fn test_execute_copies_into_target_with_parents() {
        let library = TempDir::new().expect("create library");
        let mirror = TempDir::new().expect("create mirror");
        fs::create_dir_all(library.path().join("Artist/Album")).expect("create album");
        fs::write(library.path().join("Artist/Album/01.mp3"), b"0123456789").expect("write");

        let config = Config::new(library.path(), mirror.path());
        let plan = plan_for(Direction::LIBRARY_TO_MIRROR, &["Artist/Album/01.mp3"]);

        let stats = execute_plan(&plan, &config, None);

        assert_eq!(stats.copied_files, 1);
        assert_eq!(stats.failed_files, 0);
        assert_eq!(stats.bytes_copied, 10);
        assert_eq!(
            fs::read(mirror.path().join("Artist/Album/01.mp3")).expect("read copy"),
            b"0123456789"
        );
    }

    #[test]
    fn test_execute_reverse_direction() {
        let library = TempDir::new().expect("create library");
        let mirror = TempDir::new().expect("create mirror");
        fs::write(mirror.path().join("only-on-usb.flac"), b"fLaC").expect("write");

        let config = Config::new(library.path(), mirror.path());
        let plan = plan_for(Direction::MIRROR_TO_LIBRARY, &["only-on-usb.flac"]);

        let stats = execute_plan(&plan, &config, None);

        assert_eq!(stats.copied_files, 1);
        assert!(library.path().join("only-on-usb.flac").exists());
    }

    #[test]
    fn test_failure_does_not_stop_batch() {
        let library = TempDir::new().expect("create library");
        let mirror = TempDir::new().expect("create mirror");
        fs::write(library.path().join("a.mp3"), b"a").expect("write a");
        fs::write(library.path().join("c.mp3"), b"ccc").expect("write c");

        let config = Config::new(library.path(), mirror.path());
        let plan = plan_for(Direction::LIBRARY_TO_MIRROR, &["a.mp3", "b.mp3", "c.mp3"]);

        let failures = RefCell::new(Vec::new());
        let callback = |event: &ExecutionEvent| {
            if let ExecutionEvent::FileFailed {
                index,
                total,
                error,
            } = event
            {
                failures.borrow_mut().push((*index, *total, error.to_string()));
            }
        };

        let stats = execute_plan(&plan, &config, Some(&callback));

        assert_eq!(stats.copied_files, 2);
        assert_eq!(stats.failed_files, 1);
        assert_eq!(stats.failed_paths, vec![PathBuf::from("b.mp3")]);
        assert!(mirror.path().join("c.mp3").exists());

        let failures = failures.into_inner();
        assert_eq!(failures.len(), 1);
        let (index, total, message) = &failures[0];
        assert_eq!((*index, *total), (2, 3));
        assert!(message.contains("b.mp3"));
        assert!(message.contains(&library.path().join("b.mp3").display().to_string()));
        assert!(message.contains(&mirror.path().join("b.mp3").display().to_string()));
    }

    #[test]
    fn test_existing_destination_is_not_overwritten() {
        let library = TempDir::new().expect("create library");
        let mirror = TempDir::new().expect("create mirror");
        fs::write(library.path().join("a.mp3"), b"library").expect("write library copy");
        fs::write(mirror.path().join("a.mp3"), b"mirror").expect("write mirror copy");

        let config = Config::new(library.path(), mirror.path());
        let plan = plan_for(Direction::LIBRARY_TO_MIRROR, &["a.mp3"]);

        let stats = execute_plan(&plan, &config, None);

        assert_eq!(stats.failed_files, 1);
        assert_eq!(fs::read(mirror.path().join("a.mp3")).expect("read"), b"mirror");
    }

    #[test]
    fn test_event_sequence() {
        let library = TempDir::new().expect("create library");
        let mirror = TempDir::new().expect("create mirror");
        fs::write(library.path().join("a.wav"), b"RIFF").expect("write");

        let config = Config::new(library.path(), mirror.path());
        let plan = plan_for(Direction::LIBRARY_TO_MIRROR, &["a.wav"]);

        let names = RefCell::new(Vec::new());
        let callback = |event: &ExecutionEvent| {
            let name = match event {
                ExecutionEvent::FileStart { .. } => "start",
                ExecutionEvent::FileCopied { bytes, .. } => {
                    assert_eq!(*bytes, 4);
                    "copied"
                }
                ExecutionEvent::FileFailed { .. } => "failed",
                ExecutionEvent::Complete { .. } => "complete",
            };
            names.borrow_mut().push(name);
        };

        execute_plan(&plan, &config, Some(&callback));
        assert_eq!(names.into_inner(), vec!["start", "copied", "complete"]);
    }

    #[test]
    fn test_callback_may_borrow_caller_state() {
        let library = TempDir::new().expect("create library");
        let mirror = TempDir::new().expect("create mirror");
        fs::write(library.path().join("a.mp3"), b"aa").expect("write a");
        fs::write(library.path().join("b.mp3"), b"bbb").expect("write b");

        let config = Config::new(library.path(), mirror.path());
        let plan = plan_for(Direction::LIBRARY_TO_MIRROR, &["a.mp3", "b.mp3"]);

        let copied_bytes = Cell::new(0u64);
        let callback = |event: &ExecutionEvent| {
            if let ExecutionEvent::FileCopied { bytes, .. } = event {
                copied_bytes.set(copied_bytes.get() + *bytes);
            }
        };
        execute_plan(&plan, &config, Some(&callback));

        assert_eq!(copied_bytes.get(), 5);
    }

    #[test]
    fn test_empty_plan() {
        let library = TempDir::new().expect("create library");
        let mirror = TempDir::new().expect("create mirror");
        let config = Config::new(library.path(), mirror.path());

        let stats = execute_plan(&plan_for(Direction::LIBRARY_TO_MIRROR, &[]), &config, None);
        assert_eq!(stats, ExecutionStats::default());
    }
}
