//! Process-wide stop flag.
//! The Ctrl-C handler sets it; the sorter checks it before taking the next
//! file, so an interrupted run ends after the copy in flight.
//!
//! Relaxed ordering is enough for a flag that only ever goes from false to true
//! during a run.

use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Ask running sorts to stop (idempotent, signal-handler safe).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Clear the flag. Only meant for tests that exercise interruption.
#[doc(hidden)]
#[inline]
pub fn reset() {
    SHUTDOWN.store(false, Ordering::Relaxed);
}
