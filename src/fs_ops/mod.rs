//! Filesystem operations: traversal, bucket naming and the copy primitives.

mod atomic;
mod bucket;
mod classify;
mod copy;
mod ensure;
mod helpers;
mod io_copy;
mod traverse;
mod util;

pub use bucket::{OTHER_BUCKET, bucket_name};
pub use classify::{CopyOptions, classify_and_copy, destination_for};
pub use copy::copy_replace;
pub use ensure::ensure_directory;
pub use helpers::io_hint;
pub use io_copy::DurabilityMode;
pub use traverse::{FileEntry, Traverser};
pub use util::TEMP_PREFIX;
