//! Run orchestrator.
//! Validates the roots, drives the traversal and hands every file to the
//! classify-and-copy step. Per-file failures are logged and counted; only
//! root-level problems end a run early.
//!
//! Logging goes through `tracing`. By default the global subscriber receives
//! the events; `Sorter::with_dispatch` scopes a run to its own sink instead,
//! including on the worker threads of a parallel run.

use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{Dispatch, error, info, warn};

use crate::config::Config;
use crate::errors::SortError;
use crate::fs_ops::{CopyOptions, FileEntry, Traverser, classify_and_copy, io_hint};
use crate::shutdown;

/// Outcome of a finished run. Partial success is a normal outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Files copied into a bucket (or, in dry-run, that would have been)
    pub copied: usize,
    /// Files skipped because their bucket or copy failed
    pub failed: usize,
    /// Directories or entries that could not be listed
    pub list_errors: usize,
    /// True if the run stopped early on a shutdown request
    pub interrupted: bool,
}

impl RunReport {
    /// True if every file found was copied.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.list_errors == 0 && !self.interrupted
    }
}

#[derive(Default)]
struct Counters {
    copied: AtomicUsize,
    failed: AtomicUsize,
    list_errors: AtomicUsize,
    interrupted: AtomicBool,
}

impl Counters {
    fn report(&self) -> RunReport {
        RunReport {
            copied: self.copied.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            list_errors: self.list_errors.load(Ordering::Relaxed),
            interrupted: self.interrupted.load(Ordering::Relaxed),
        }
    }
}

/// Sorts one source tree into one destination root.
pub struct Sorter {
    config: Config,
    dispatch: Option<Dispatch>,
}

impl Sorter {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            dispatch: None,
        }
    }

    /// Send this run's log events to `dispatch` instead of the global subscriber.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Sort every regular file below the source into per-extension buckets.
    ///
    /// Returns `Err` only for root-level failures (missing source, destination
    /// that cannot be created, overlapping roots). Anything that goes wrong with
    /// a single file is logged, counted in the report, and skipped.
    pub fn run(&self) -> Result<RunReport, SortError> {
        self.scoped(|| self.run_inner())
    }

    fn scoped<R>(&self, f: impl FnOnce() -> R) -> R {
        match &self.dispatch {
            Some(d) => tracing::dispatcher::with_default(d, f),
            None => f(),
        }
    }

    fn copy_options(&self) -> CopyOptions {
        CopyOptions {
            dry_run: self.config.dry_run,
            sync: self.config.sync,
        }
    }

    fn run_inner(&self) -> Result<RunReport, SortError> {
        let roots = self.config.prepare_roots()?;

        info!(
            source = %roots.source.display(),
            output = %roots.output.display(),
            jobs = self.config.jobs,
            dry_run = self.config.dry_run,
            "Started copying files."
        );

        let mut traverser = Traverser::new(&roots.source);
        if let Some(dir) = &roots.prune {
            traverser = traverser.skip_dir(dir);
        }

        let counters = Counters::default();
        if self.config.jobs > 1 {
            self.run_parallel(traverser, &roots.output, &counters);
        } else {
            self.run_sequential(traverser, &roots.output, &counters);
        }

        let report = counters.report();
        if report.interrupted {
            warn!("Stopped early: shutdown requested");
        }
        info!(
            copied = report.copied,
            failed = report.failed,
            list_errors = report.list_errors,
            "Finished copying files."
        );
        Ok(report)
    }

    fn run_sequential(&self, traverser: Traverser, output: &Path, counters: &Counters) {
        for item in traverser {
            if shutdown::is_requested() {
                counters.interrupted.store(true, Ordering::Relaxed);
                break;
            }
            self.handle(item, output, counters);
        }
    }

    fn run_parallel(&self, traverser: Traverser, output: &Path, counters: &Counters) {
        let jobs = self.config.jobs;
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .thread_name(|i| format!("file_sorter-{i}"))
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                warn!(error = %e, jobs, "Could not start worker pool; copying sequentially");
                return self.run_sequential(traverser, output, counters);
            }
        };

        // Worker threads do not inherit the caller's scoped dispatcher; the
        // walk itself is also pulled from them.
        let mut traverser = traverser;
        let items = std::iter::from_fn(move || self.scoped(|| traverser.next()));
        let _ = pool.install(|| {
            items.par_bridge().try_for_each(|item| {
                if shutdown::is_requested() {
                    counters.interrupted.store(true, Ordering::Relaxed);
                    return Err(());
                }
                self.scoped(|| self.handle(item, output, counters));
                Ok(())
            })
        });
    }

    fn handle(&self, item: Result<FileEntry, SortError>, output: &Path, counters: &Counters) {
        let entry = match item {
            Ok(entry) => entry,
            Err(e) => {
                log_failure(&e);
                counters.list_errors.fetch_add(1, Ordering::Relaxed);
                return;
            }
        };
        match classify_and_copy(&entry, output, self.copy_options()) {
            Ok(_) => {
                counters.copied.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                log_failure(&e);
                counters.failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

/// Error line for a skipped file or directory, with enough context to act on.
fn log_failure(e: &SortError) {
    let code = e.code();
    let kind = e.kind();
    match e {
        SortError::DirectoryCreateFailed { path, source } => {
            let hint = io_hint(source).unwrap_or_default();
            error!(code, kind, path = %path.display(), error = %source, hint, "Error while creating bucket directory; file skipped")
        }
        SortError::CopyFailed { src, dest, source } => {
            let hint = io_hint(source).unwrap_or_default();
            error!(code, kind, src = %src.display(), dest = %dest.display(), error = %source, hint, "Error while copying file; file skipped")
        }
        SortError::ListFailed { path, source } => {
            let hint = io_hint(source).unwrap_or_default();
            error!(code, kind, path = %path.display(), error = %source, hint, "Error while listing directory; entries skipped")
        }
        _ => error!(code, kind, error = %e, "Unexpected error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use serial_test::serial;
    use std::fs;

    fn tree() -> assert_fs::TempDir {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src/doc.pdf").write_str("pdf").unwrap();
        temp.child("src/notes.txt").write_str("notes").unwrap();
        temp.child("src/archive").write_str("raw").unwrap();
        temp.child("src/deep/er/more.txt").write_str("more").unwrap();
        temp
    }

    #[test]
    #[serial]
    fn sorts_tree_into_buckets() {
        let temp = tree();
        let out = temp.path().join("out");
        let report = Sorter::new(Config::new(temp.path().join("src"), &out))
            .run()
            .unwrap();

        assert_eq!(
            report,
            RunReport {
                copied: 4,
                ..Default::default()
            }
        );
        assert!(report.is_clean());
        assert_eq!(fs::read_to_string(out.join("pdf/doc.pdf")).unwrap(), "pdf");
        assert_eq!(fs::read_to_string(out.join("txt/notes.txt")).unwrap(), "notes");
        assert_eq!(fs::read_to_string(out.join("txt/more.txt")).unwrap(), "more");
        assert_eq!(fs::read_to_string(out.join("other/archive")).unwrap(), "raw");
    }

    #[test]
    #[serial]
    fn parallel_run_matches_sequential() {
        let temp = tree();
        let out = temp.path().join("out");
        let report = Sorter::new(Config::new(temp.path().join("src"), &out).with_jobs(4))
            .run()
            .unwrap();
        assert_eq!(report.copied, 4);
        assert!(out.join("txt/more.txt").is_file());
        assert!(out.join("other/archive").is_file());
    }

    #[test]
    #[serial]
    fn dry_run_counts_but_creates_nothing() {
        let temp = tree();
        let out = temp.path().join("out");
        let report = Sorter::new(Config::new(temp.path().join("src"), &out).with_dry_run(true))
            .run()
            .unwrap();
        assert_eq!(report.copied, 4);
        assert!(!out.exists());
    }

    #[test]
    #[serial]
    fn shutdown_request_stops_before_next_file() {
        let temp = tree();
        let out = temp.path().join("out");
        shutdown::request();
        let report = Sorter::new(Config::new(temp.path().join("src"), &out)).run();
        shutdown::reset();

        let report = report.unwrap();
        assert!(report.interrupted);
        assert_eq!(report.copied, 0);
        assert!(out.is_dir(), "destination root is still created");
    }

    #[test]
    #[serial]
    fn missing_source_is_fatal() {
        let temp = assert_fs::TempDir::new().unwrap();
        let err = Sorter::new(Config::new(temp.path().join("nope"), temp.path().join("out")))
            .run()
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, SortError::RootMissing(_)));
    }
}
