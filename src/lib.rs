//! Core library for `file_sorter`.
//!
//! Walks a source tree depth-first and copies every regular file into
//! `<output>/<extension>/<base name>` (`other` for files without an extension).
//! A file that cannot be copied is logged and skipped; only problems with the
//! two roots stop a run.
//!
//! ```no_run
//! use file_sorter::{Config, Sorter};
//!
//! let report = Sorter::new(Config::new("/data/inbox", "/data/sorted")).run()?;
//! println!("{} copied, {} failed", report.copied, report.failed);
//! # Ok::<(), file_sorter::SortError>(())
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod shutdown;
pub mod sorter;

pub use config::{Config, LogLevel, Roots, default_config_path, path_has_symlink_ancestor};
pub use errors::SortError;
pub use fs_ops::{
    CopyOptions, FileEntry, OTHER_BUCKET, Traverser, bucket_name, classify_and_copy,
    ensure_directory,
};
pub use sorter::{RunReport, Sorter};
