//! Lazy depth-first directory traversal.
//!
//! `Traverser` wraps a `walkdir` walk: files are yielded as soon as their
//! directory is listed, and a subdirectory is drained before its parent's
//! remaining siblings. The walk caps how many directory handles stay open, so
//! very deep trees are still read completely.
//!
//! Policy for non-regular entries: links are never followed, and entries are
//! classified by their own file type. Symlinks (to files or directories),
//! sockets, FIFOs and devices are skipped. Symlink cycles therefore cannot
//! trap the walk.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::errors::SortError;

/// A path that was a regular file when its parent directory was listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    name: OsString,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<OsString>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Build an entry from a path alone; the base name is its last component.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_owned();
        Some(Self { path, name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &OsStr {
        &self.name
    }

    /// Raw extension of the base name (no normalization).
    pub fn extension(&self) -> Option<&OsStr> {
        Path::new(&self.name).extension()
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Depth-first iterator over every regular file below a root directory.
///
/// Listing failures do not end the walk: the unreadable directory (or entry)
/// is reported as one `SortError::ListFailed` item and traversal continues.
pub struct Traverser {
    walk: walkdir::IntoIter,
    skip: Vec<PathBuf>,
}

impl Traverser {
    /// Nothing is read until the first call to `next()`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            walk: WalkDir::new(root.into()).follow_links(false).into_iter(),
            skip: Vec::new(),
        }
    }

    /// Do not descend into `dir`. Compared against paths built by joining
    /// entry names onto the root, so pass it in the same form as the root.
    pub fn skip_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.skip.push(dir.into());
        self
    }
}

fn list_failed(err: walkdir::Error) -> SortError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other(message));
    SortError::ListFailed { path, source }
}

impl Iterator for Traverser {
    type Item = Result<FileEntry, SortError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walk.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(list_failed(e))),
            };
            let ftype = entry.file_type();

            if entry.depth() == 0 {
                if ftype.is_dir() {
                    continue;
                }
                let path = entry.into_path();
                return Some(Err(SortError::ListFailed {
                    path,
                    source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
                }));
            }

            if ftype.is_file() {
                let name = entry.file_name().to_owned();
                return Some(Ok(FileEntry::new(entry.into_path(), name)));
            }
            if ftype.is_dir() {
                if self.skip.iter().any(|s| s == entry.path()) {
                    debug!(dir = %entry.path().display(), "not descending into excluded directory");
                    self.walk.skip_current_dir();
                    continue;
                }
                trace!(dir = %entry.path().display(), depth = entry.depth(), "descending");
                continue;
            }
            trace!(path = %entry.path().display(), "skipping non-regular entry");
        }
    }
}
