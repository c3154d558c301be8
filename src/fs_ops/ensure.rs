use std::fs;
use std::io;
use std::path::Path;

/// Make sure `path` is a directory.
///
/// Returns `Ok(true)` if this call created it and `Ok(false)` if it was
/// already there, including when another thread or process created it
/// between our check and our `mkdir`. Fails only on a real I/O error or when
/// something other than a directory occupies the path. The parent must exist.
pub fn ensure_directory(path: &Path) -> io::Result<bool> {
    match fs::create_dir(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            if fs::metadata(path)?.is_dir() {
                Ok(false)
            } else {
                Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} exists and is not a directory", path.display()),
                ))
            }
        }
        Err(e) => Err(e),
    }
}
