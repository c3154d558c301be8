//! Replace-copy helper:
//! - streams the source into a hidden temp file in the destination directory
//! - renames the temp file over the destination (overwrite, never append)
//! - removes the temp file if any step fails
//!
//! Because the source is fully read before the rename, copying a file onto
//! itself leaves it intact.

use std::fs;
use std::io;
use std::path::Path;

use super::atomic::rename_over;
use super::io_copy::{self, DurabilityMode};
use super::util;

/// Copy `src` to `dest`, replacing any existing file at `dest`.
/// The parent directory of `dest` must already exist. Returns bytes copied.
pub fn copy_replace(src: &Path, dest: &Path, mode: DurabilityMode) -> io::Result<u64> {
    let dest_dir = dest.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("destination has no parent: {}", dest.display()),
        )
    })?;

    let tmp = util::unique_temp_path(dest_dir);
    let result = io_copy::copy_streaming(src, &tmp, mode)
        .and_then(|bytes| rename_over(&tmp, dest, mode).map(|()| bytes));

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
