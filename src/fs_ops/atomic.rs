//! Rename-over helper.
//! Replaces the destination in one step so readers never see a partial file.
//! On Windows `rename` refuses to overwrite, so an existing destination file
//! is removed first (the replace is then not atomic there).

use std::fs;
use std::io;
use std::path::Path;

use super::io_copy::DurabilityMode;
use super::util;

pub(super) fn rename_over(tmp: &Path, dst: &Path, mode: DurabilityMode) -> io::Result<()> {
    #[cfg(windows)]
    {
        if let Err(e) = fs::remove_file(dst)
            && e.kind() != io::ErrorKind::NotFound
        {
            return Err(e);
        }
    }

    fs::rename(tmp, dst)?;

    // Persisting the directory entry only matters when the caller asked for it;
    // a failed fsync must not turn a finished rename into a failure.
    if mode == DurabilityMode::Full
        && let Some(parent) = dst.parent()
    {
        let _ = util::fsync_dir(parent);
    }
    Ok(())
}
