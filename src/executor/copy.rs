//! Single-file copy

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::SystemTime;
use tracing::warn;

const COPY_BUFFER_SIZE: usize = 128 * 1024;

/// Copy `src` to `dest`, creating missing parent directories first
///
/// The destination must not exist yet; an existing file fails with
/// `AlreadyExists` and is left untouched. The source modification time is
/// carried over where the target filesystem allows it; failing to do so is
/// only logged. A copy interrupted part way leaves the partial file behind.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(io::Error)` - The first failing filesystem call
///
/// # Example
/// ```no_run
/// use musync::executor::copy_file;
/// use std::path::Path;
///
/// let bytes = copy_file(
///     Path::new("/home/me/Music/Artist/track.flac"),
///     Path::new("/media/usb/Music/Artist/track.flac"),
/// )?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn copy_file(src: &Path, dest: &Path) -> io::Result<u64> {
    // Idempotent: existing directories are fine
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut src_file = File::open(src)?;
    let modified = src_file.metadata().and_then(|meta| meta.modified());
    let mut dest_file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dest)?;

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = match src_file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        dest_file.write_all(&buffer[..bytes_read])?;
        total_bytes += bytes_read as u64;
    }

    // Removable media: make sure the data is on the device before reporting success
    dest_file.sync_all()?;
    drop(dest_file);

    // The data is on disk, a rescan will count it whatever happens here
    preserve_mtime(modified, dest);

    Ok(total_bytes)
}

fn preserve_mtime(modified: io::Result<SystemTime>, dest: &Path) {
    let result = modified.and_then(|mtime| {
        filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(mtime))
    });
    if let Err(e) = result {
        warn!(
            "Copied {} but could not keep its modification time: {}",
            dest.display(),
            e
        );
    }
}
