//! Typed error definitions for file_sorter.
//! Root-level variants abort a run; per-file variants are logged and skipped.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SortError {
    #[error("Source directory does not exist: {0}")]
    RootMissing(PathBuf),

    #[error("Source path is not a directory: {0}")]
    RootNotDirectory(PathBuf),

    #[error("Error while creating directory {path}: {source}")]
    RootCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Source and destination resolve to the same directory: {0}")]
    RootsOverlap(PathBuf),

    #[error("Error while creating bucket directory {path}: {source}")]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error while copying {src} to {dest}: {source}")]
    CopyFailed {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error while listing {path}: {source}")]
    ListFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SortError {
    /// Stable numeric code, used as the `code` field in structured logs.
    pub fn code(&self) -> i32 {
        match self {
            SortError::RootMissing(_) => 2,
            SortError::RootNotDirectory(_) => 3,
            SortError::RootCreateFailed { .. } => 4,
            SortError::RootsOverlap(_) => 5,
            SortError::DirectoryCreateFailed { .. } => 10,
            SortError::CopyFailed { .. } => 11,
            SortError::ListFailed { .. } => 12,
        }
    }

    /// Short machine-friendly name, used as the `kind` field in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SortError::RootMissing(_) => "root_missing",
            SortError::RootNotDirectory(_) => "root_not_directory",
            SortError::RootCreateFailed { .. } => "root_create_failed",
            SortError::RootsOverlap(_) => "roots_overlap",
            SortError::DirectoryCreateFailed { .. } => "directory_create_failed",
            SortError::CopyFailed { .. } => "copy_failed",
            SortError::ListFailed { .. } => "list_failed",
        }
    }

    /// True for conditions that stop the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SortError::RootMissing(_)
                | SortError::RootNotDirectory(_)
                | SortError::RootCreateFailed { .. }
                | SortError::RootsOverlap(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_file_errors_are_not_fatal() {
        let e = SortError::CopyFailed {
            src: PathBuf::from("a.txt"),
            dest: PathBuf::from("out/txt/a.txt"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(!e.is_fatal());
        assert_eq!(e.code(), 11);
        assert!(e.to_string().contains("a.txt"));

        let e = SortError::DirectoryCreateFailed {
            path: PathBuf::from("out/txt"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(!e.is_fatal());
    }

    #[test]
    fn root_errors_are_fatal() {
        assert!(SortError::RootMissing(PathBuf::from("/nope")).is_fatal());
        assert!(SortError::RootsOverlap(PathBuf::from("/x")).is_fatal());
        let e = SortError::RootCreateFailed {
            path: PathBuf::from("/out"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(e.is_fatal());
        assert_eq!(e.kind(), "root_create_failed");
    }
}
