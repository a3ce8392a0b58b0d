//! Shared path construction for stored files.

use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Final location of `filename` inside `kind_dir`.
pub fn final_path(kind_dir: &Path, filename: &str) -> PathBuf {
    kind_dir.join(filename)
}

/// Staging location for a file in `kind_dir`: a hidden, uniquely named
/// sibling of the final path, so the promoting rename never crosses a
/// filesystem boundary. The name has a fixed length and fits wherever the
/// final name does.
pub fn staging_path(kind_dir: &Path) -> PathBuf {
    kind_dir.join(format!(".{}.part", Uuid::new_v4().simple()))
}

/// Whether `filename` is a single plain path component.
pub fn is_plain_filename(filename: &str) -> bool {
    !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\'])
}
