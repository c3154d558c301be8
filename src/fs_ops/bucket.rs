use std::path::Path;

/// Bucket used for files whose name carries no extension.
pub const OTHER_BUCKET: &str = "other";

/// Bucket name for a file: its lowercased extension without the dot, or
/// [`OTHER_BUCKET`] when there is none. Only the last extension counts
/// (`a.tar.gz` -> `gz`); dot-files such as `.bashrc` have no extension.
pub fn bucket_name(file_name: impl AsRef<Path>) -> String {
    match file_name
        .as_ref()
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
    {
        Some(ext) if !ext.is_empty() => ext,
        _ => OTHER_BUCKET.to_string(),
    }
}
