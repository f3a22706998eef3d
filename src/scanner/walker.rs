//! Sequential directory walker

use crate::scanner::ExtensionFilter;
use crate::types::{FileEntry, Inventory, SyncError};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};

/// Callback for reporting scan progress
///
/// Argument: number of matching files found so far
pub type ProgressCallback = Box<dyn Fn(u64) + Send + Sync>;

/// Scan a directory and build an Inventory
///
/// Walks the tree recursively (hidden directories included, ignore files not
/// honoured) and keeps every regular file whose extension is in `filter`.
/// Entry paths are relative to `root_path`.
///
/// # Errors
/// * `SyncError::PathNotFound` if `root_path` does not exist
/// * `SyncError::Config` if `root_path` is not a directory
/// * `SyncError::RootUnreadable` if `root_path` itself cannot be listed
///
/// Unreadable entries below the root are logged and skipped.
pub fn scan_directory(
    root_path: &Path,
    filter: &ExtensionFilter,
    on_progress: Option<&ProgressCallback>,
) -> Result<Inventory, SyncError> {
    if !root_path.exists() {
        return Err(SyncError::PathNotFound {
            path: root_path.to_path_buf(),
        });
    }
    if !root_path.is_dir() {
        return Err(SyncError::Config(format!(
            "Not a directory: {}",
            root_path.display()
        )));
    }

    let start_time = Instant::now();
    let mut inventory = Inventory::new(root_path.to_path_buf());
    let mut matched: u64 = 0;

    debug!(
        "scanning {} for {}",
        root_path.display(),
        filter.extensions().join(", ")
    );

    let walker = ignore::WalkBuilder::new(root_path)
        .standard_filters(false)
        .follow_links(false)
        .build();

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            // An empty inventory would flip the copy direction
            Err(e) if e.depth() == Some(0) => {
                return Err(SyncError::RootUnreadable {
                    path: root_path.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root_path.display(), e);
                continue;
            }
        };

        let file_type = match entry.file_type() {
            Some(ft) => ft,
            None => continue,
        };

        if file_type.is_dir() {
            if entry.depth() > 0 {
                inventory.increment_dirs();
            }
            continue;
        }

        // Symlinks count only when they point at a regular file
        let is_file = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
        if !is_file || !filter.matches(entry.path()) {
            continue;
        }

        let relative_path = match entry.path().strip_prefix(root_path) {
            Ok(p) => p.to_path_buf(),
            Err(_) => {
                warn!(
                    "Cannot make {} relative to {}, skipping",
                    entry.path().display(),
                    root_path.display()
                );
                continue;
            }
        };

        debug!("found {}", relative_path.display());
        inventory.push(FileEntry::new(relative_path));

        matched += 1;
        if let Some(callback) = on_progress {
            callback(matched);
        }
    }

    inventory.set_scan_duration(start_time.elapsed());
    debug!(
        "scanned {}: {} files in {} directories ({:?})",
        root_path.display(),
        inventory.len(),
        inventory.total_dirs,
        inventory.scan_duration
    );

    Ok(inventory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn music_filter() -> ExtensionFilter {
        ExtensionFilter::new(&["mp3", "wav", "flac"]).expect("valid filter")
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root_path = temp_dir.path();

        let inventory =
            scan_directory(root_path, &music_filter(), None).expect("scan should succeed");

        assert!(inventory.is_empty(), "Inventory should be empty");
        assert_eq!(inventory.root_path, root_path);
    }

    #[test]
    fn test_scan_missing_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("unplugged");

        match scan_directory(&missing, &music_filter(), None) {
            Err(SyncError::PathNotFound { path }) => assert_eq!(path, missing),
            other => panic!("expected PathNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_root_is_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file = temp_dir.path().join("song.mp3");
        fs::write(&file, b"id3").expect("write file");

        let err = scan_directory(&file, &music_filter(), None).expect_err("file root");
        assert!(matches!(err, SyncError::Config(_)));
    }

    #[test]
    fn test_scan_filters_and_relativizes() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();

        fs::create_dir_all(root.join("Artist/Album")).expect("create dirs");
        fs::write(root.join("Artist/Album/01.mp3"), b"a").expect("write mp3");
        fs::write(root.join("Artist/Album/02.FLAC"), b"b").expect("write flac");
        fs::write(root.join("Artist/Album/cover.jpg"), b"c").expect("write jpg");
        fs::write(root.join("notes.txt"), b"d").expect("write txt");

        let inventory = scan_directory(root, &music_filter(), None).expect("scan");

        assert_eq!(inventory.len(), 2);
        assert!(inventory.path_set().contains(Path::new("Artist/Album/01.mp3")));
        assert!(inventory.path_set().contains(Path::new("Artist/Album/02.FLAC")));
        assert!(!inventory.path_set().contains(Path::new("notes.txt")));
        assert_eq!(inventory.total_dirs, 2);
    }

    #[test]
    fn test_scan_does_not_depend_on_root_name() {
        // Nothing special about a directory called "Music"
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().join("Music/Music");
        fs::create_dir_all(root.join("Music")).expect("create dirs");
        fs::write(root.join("Music/song.mp3"), b"x").expect("write");

        let inventory = scan_directory(&root, &music_filter(), None).expect("scan");
        assert_eq!(inventory.entries, vec![FileEntry::new("Music/song.mp3")]);
    }

    #[test]
    fn test_scan_includes_hidden_and_ignored() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();

        fs::create_dir(root.join(".hidden")).expect("create hidden dir");
        fs::write(root.join(".hidden/secret.mp3"), b"x").expect("write hidden");
        fs::write(root.join(".gitignore"), "*.mp3\n").expect("write gitignore");
        fs::write(root.join("plain.mp3"), b"x").expect("write plain");

        let inventory = scan_directory(root, &music_filter(), None).expect("scan");

        assert!(inventory.path_set().contains(Path::new(".hidden/secret.mp3")));
        assert!(inventory.path_set().contains(Path::new("plain.mp3")));
    }

    #[test]
    #[cfg(unix)]
    fn test_scan_skips_broken_symlink() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();

        std::os::unix::fs::symlink(root.join("nowhere.mp3"), root.join("broken.mp3"))
            .expect("create symlink");

        let inventory = scan_directory(root, &music_filter(), None).expect("scan");
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_scan_progress_callback() {
        use std::sync::atomic::{AtomicU64, Ordering};
        use std::sync::Arc;

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        for i in 1..=4 {
            fs::write(root.join(format!("track{}.wav", i)), b"riff").expect("write track");
        }
        fs::write(root.join("skip.txt"), b"no").expect("write txt");

        let last_seen = Arc::new(AtomicU64::new(0));
        let last_seen_clone = Arc::clone(&last_seen);
        let callback: ProgressCallback = Box::new(move |files: u64| {
            last_seen_clone.store(files, Ordering::SeqCst);
        });

        let inventory = scan_directory(root, &music_filter(), Some(&callback)).expect("scan");

        assert_eq!(last_seen.load(Ordering::SeqCst), 4);
        assert_eq!(inventory.len(), 4);
    }

    #[cfg(unix)]
    fn lock(dir: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(mode)).expect("set permissions");
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_root_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().join("Music");
        fs::create_dir(&root).expect("create root");
        fs::write(root.join("a.mp3"), b"id3").expect("write track");

        lock(&root, 0o000);
        if fs::read_dir(&root).is_ok() {
            // Running with privileges that ignore permissions
            lock(&root, 0o755);
            return;
        }
        let result = scan_directory(&root, &music_filter(), None);
        lock(&root, 0o755);

        match result {
            Err(SyncError::RootUnreadable { path, .. }) => assert_eq!(path, root),
            other => panic!("expected RootUnreadable, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir(root.join("Locked")).expect("create locked dir");
        fs::write(root.join("Locked/hidden.mp3"), b"id3").expect("write locked track");
        fs::write(root.join("open.mp3"), b"id3").expect("write track");

        lock(&root.join("Locked"), 0o000);
        let result = scan_directory(root, &music_filter(), None);
        lock(&root.join("Locked"), 0o755);

        let inventory = result.expect("subdirectory errors are not fatal");
        assert!(inventory
            .iter()
            .any(|entry| entry.path == PathBuf::from("open.mp3")));
    }
}
