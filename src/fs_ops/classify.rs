//! Per-file classify-and-copy step.
//! Picks the bucket from the file's extension, makes sure the bucket exists,
//! then replace-copies the file into it under its base name.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::SortError;

use super::bucket::bucket_name;
use super::copy::copy_replace;
use super::ensure::ensure_directory;
use super::io_copy::DurabilityMode;
use super::traverse::FileEntry;

/// Knobs for a single copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyOptions {
    /// Log the target but do not touch the filesystem.
    pub dry_run: bool,
    /// fsync each copied file and its bucket entry.
    pub sync: bool,
}

impl CopyOptions {
    fn durability(&self) -> DurabilityMode {
        if self.sync {
            DurabilityMode::Full
        } else {
            DurabilityMode::Data
        }
    }
}

/// Destination of `entry` under `dest_root`, without touching the filesystem.
pub fn destination_for(entry: &FileEntry, dest_root: &Path) -> PathBuf {
    dest_root
        .join(bucket_name(entry.file_name()))
        .join(entry.file_name())
}

/// Copy one file into its bucket below `dest_root` and return where it landed.
///
/// Files from different subdirectories that share a base name and an
/// extension land on the same destination; the later copy replaces the
/// earlier one.
pub fn classify_and_copy(
    entry: &FileEntry,
    dest_root: &Path,
    opts: CopyOptions,
) -> Result<PathBuf, SortError> {
    let dest = destination_for(entry, dest_root);

    if opts.dry_run {
        info!(src = %entry.path().display(), dest = %dest.display(), "dry-run: would copy file");
        return Ok(dest);
    }

    let bucket = dest_root.join(bucket_name(entry.file_name()));
    match ensure_directory(&bucket) {
        Ok(true) => info!(bucket = %bucket.display(), "Created bucket directory"),
        Ok(false) => {}
        Err(source) => {
            return Err(SortError::DirectoryCreateFailed {
                path: bucket,
                source,
            });
        }
    }

    debug!(src = %entry.path().display(), dest = %dest.display(), "Copying file");
    match copy_replace(entry.path(), &dest, opts.durability()) {
        Ok(bytes) => {
            debug!(dest = %dest.display(), bytes, "Copied file");
            Ok(dest)
        }
        Err(source) => Err(SortError::CopyFailed {
            src: entry.path().to_path_buf(),
            dest,
            source,
        }),
    }
}
