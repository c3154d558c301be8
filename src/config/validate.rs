//! Root validation.
//! Checks the source root, creates the destination root once, and works out
//! how the two relate before any file is touched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::errors::SortError;

use super::types::Config;

/// Roots of a run after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    /// Canonical source directory
    pub source: PathBuf,
    /// Canonical destination directory (as given when it does not exist yet in dry-run)
    pub output: PathBuf,
    /// Destination subtree to leave out of the traversal when it sits inside the source
    pub prune: Option<PathBuf>,
}

impl Config {
    /// Validate the source, create the destination if needed, and resolve both.
    ///
    /// Only root-level conditions are reported here; they are all fatal.
    pub fn prepare_roots(&self) -> Result<Roots, SortError> {
        let src = &self.source;
        let out = &self.output;

        // 1) Source: must exist and be a directory.
        if !src.exists() {
            error!("Source directory {} does not exist", src.display());
            return Err(SortError::RootMissing(src.clone()));
        }
        if !src.is_dir() {
            error!("Source path {} is not a directory", src.display());
            return Err(SortError::RootNotDirectory(src.clone()));
        }

        // 2) Destination: must be a directory; created once if missing.
        ensure_output_root(out, self.dry_run)?;

        // 3) Resolve symlinks and see how the roots relate.
        let src_real = fs::canonicalize(src).unwrap_or_else(|_| src.clone());
        let out_real = fs::canonicalize(out).unwrap_or_else(|_| out.clone());

        if src_real == out_real {
            error!("Source and destination are the same directory: {}", src_real.display());
            return Err(SortError::RootsOverlap(src_real));
        }
        let prune = if out_real.starts_with(&src_real) {
            debug!(
                "Destination {} is inside the source; it will not be traversed",
                out_real.display()
            );
            Some(out_real.clone())
        } else {
            None
        };
        if src_real.starts_with(&out_real) {
            warn!(
                "Source {} is inside the destination {}; buckets may be created inside the source",
                src_real.display(),
                out_real.display()
            );
        }

        debug!(
            source = %src_real.display(),
            output = %out_real.display(),
            "Roots validated"
        );
        Ok(Roots {
            source: src_real,
            output: out_real,
            prune,
        })
    }
}

fn ensure_output_root(out: &Path, dry_run: bool) -> Result<(), SortError> {
    if out.exists() {
        if !out.is_dir() {
            error!("Destination {} exists but isn't a directory", out.display());
            return Err(SortError::RootCreateFailed {
                path: out.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "exists and is not a directory",
                ),
            });
        }
        return Ok(());
    }

    if dry_run {
        info!(action = "mkdir -p", path = %out.display(), "dry-run");
        return Ok(());
    }

    fs::create_dir_all(out).map_err(|source| {
        error!("Error while creating directory {}: {}", out.display(), source);
        SortError::RootCreateFailed {
            path: out.to_path_buf(),
            source,
        }
    })?;
    info!("Created destination directory: {}", out.display());
    Ok(())
}
