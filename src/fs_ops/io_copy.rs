//! Byte copy into a fresh file.
//!
//! The destination is opened with `create_new`, so an existing file is never
//! written through; callers copy into a temp name and rename it into place.
//! The source is read once from start to EOF. If it grows while being copied,
//! the extra bytes are not included.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// How hard to push the written bytes towards the disk before returning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DurabilityMode {
    /// Leave the data in the OS page cache. Fastest.
    #[default]
    Data,
    /// `sync_all` the destination before returning.
    Full,
}

/// Copy `src` into the new file `dst` and return the number of bytes written.
///
/// `io::copy` between two `File`s lets std use in-kernel copies where the
/// platform offers them (copy_file_range / sendfile on Linux).
pub(super) fn copy_streaming(src: &Path, dst: &Path, mode: DurabilityMode) -> io::Result<u64> {
    let mut src_f = File::open(src)?;
    let mut dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;

    let bytes = io::copy(&mut src_f, &mut dst_f)?;

    if mode == DurabilityMode::Full {
        dst_f.sync_all()?;
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn copy_small_file_ok() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.txt");
        let dst = dir.path().join("dst.txt");
        fs::write(&src, b"hello world").unwrap();

        let n = copy_streaming(&src, &dst, DurabilityMode::Full).unwrap();
        assert_eq!(n, 11);
        assert_eq!(fs::read(&dst).unwrap(), b"hello world");
    }

    #[test]
    fn copy_zero_length_ok() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("empty");
        let dst = dir.path().join("out");
        File::create(&src).unwrap();

        assert_eq!(copy_streaming(&src, &dst, DurabilityMode::Data).unwrap(), 0);
        assert_eq!(fs::metadata(&dst).unwrap().len(), 0);
    }

    #[test]
    fn never_writes_through_an_existing_destination() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        fs::write(&src, b"new").unwrap();
        fs::write(&dst, b"old").unwrap();

        let err = copy_streaming(&src, &dst, DurabilityMode::Data).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&dst).unwrap(), b"old");
    }

    #[test]
    fn missing_source_is_not_found() {
        let dir = tempdir().unwrap();
        let err = copy_streaming(
            &dir.path().join("gone"),
            &dir.path().join("dst"),
            DurabilityMode::Data,
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!dir.path().join("dst").exists());
    }
}
