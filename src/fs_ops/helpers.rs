//! I/O error hints.
//!
//! Turns a raw `io::Error` into a short actionable hint for log lines, so a
//! per-file failure says what to check rather than only the OS message.
//!
//! Usage:
//!   error!(error = %e, hint = io_hint(&e).unwrap_or(""), "copy failed");

use std::io;

/// Hint for an I/O error, chosen by raw OS code first, then by `ErrorKind`.
pub fn io_hint(e: &io::Error) -> Option<&'static str> {
    if let Some(code) = e.raw_os_error()
        && let Some(hint) = os_code_hint(code)
    {
        return Some(hint);
    }
    match e.kind() {
        io::ErrorKind::PermissionDenied => {
            Some("permission denied; check ownership and write permissions")
        }
        io::ErrorKind::NotFound => Some("path not found; it may have been removed during the run"),
        io::ErrorKind::AlreadyExists => {
            Some("something other than a directory already occupies this path")
        }
        _ => None,
    }
}

#[cfg(unix)]
fn os_code_hint(code: i32) -> Option<&'static str> {
    match code {
        libc::EACCES | libc::EPERM => {
            Some("permission denied; check ownership and write permissions")
        }
        libc::ENOENT => Some("path not found; it may have been removed during the run"),
        libc::ENOSPC => Some("insufficient space on device"),
        libc::EDQUOT => Some("disk quota exceeded"),
        libc::EROFS => Some("read-only filesystem; cannot write here"),
        libc::EISDIR => Some("a directory is in the way of the destination file"),
        libc::ENOTDIR => Some("a file is in the way where a directory is expected"),
        libc::ENAMETOOLONG => Some("filename or path too long"),
        libc::EMFILE => Some("process file descriptor limit reached; the tree may be very deep"),
        libc::ENFILE => Some("system-wide file table overflow"),
        _ => None,
    }
}

#[cfg(windows)]
fn os_code_hint(code: i32) -> Option<&'static str> {
    match code {
        5 => Some("access denied; check permissions"),       // ERROR_ACCESS_DENIED
        32 => Some("sharing violation; the file is in use"), // ERROR_SHARING_VIOLATION
        2 | 3 => Some("path not found; it may have been removed during the run"),
        112 => Some("insufficient disk space"),                    // ERROR_DISK_FULL
        206 => Some("filename or path too long (MAX_PATH exceeded)"), // ERROR_FILENAME_EXCED_RANGE
        _ => None,
    }
}

#[cfg(not(any(unix, windows)))]
fn os_code_hint(_code: i32) -> Option<&'static str> {
    None
}
