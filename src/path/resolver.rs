/*!
 * Path Resolver
 * Resolve a program name or path to a concrete regular file
 */

use super::search::SearchPath;
use crate::core::errors::{FileError, FileResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve `path` to an existing regular file
///
/// A path that already names a regular file is returned unchanged. Otherwise
/// the basename of `path` is looked up in each directory of `search`, in
/// order, and the first regular file wins.
///
/// Symlinks are never followed: a symlink, directory, device or socket is
/// not a valid target, even if a symlink points at a regular file.
///
/// # Errors
///
/// `FileError::Io` when `path` is empty (checked before any filesystem
/// access) or when no candidate resolves.
pub fn locate(path: impl AsRef<Path>, search: Option<&SearchPath>) -> FileResult<PathBuf> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(FileError::Io(format!("path '{}' is empty", path.display())));
    }

    if is_regular_file(path) {
        return Ok(path.to_path_buf());
    }

    if let (Some(search), Some(name)) = (search, path.file_name()) {
        for dir in search.dirs() {
            let candidate = dir.join(name);
            if is_regular_file(&candidate) {
                debug!(
                    name = %path.display(),
                    resolved = %candidate.display(),
                    "located in search path"
                );
                return Ok(candidate);
            }
        }
    }

    Err(FileError::Io(format!("path '{}' doesn't exist", path.display())))
}

/// [`locate`] with the search path taken from the `PATH` environment variable
///
/// The environment is only read when `search_in_path` is set. An unset
/// `PATH` simply disables the fallback.
pub fn locate_in_env(path: impl AsRef<Path>, search_in_path: bool) -> FileResult<PathBuf> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(FileError::Io(format!("path '{}' is empty", path.display())));
    }

    let search = if search_in_path { SearchPath::from_env() } else { None };
    locate(path, search.as_ref())
}

/// Check whether anything exists at `path` (following symlinks)
pub fn exists(path: impl AsRef<Path>) -> bool {
    std::fs::metadata(path).is_ok()
}

fn is_regular_file(path: &Path) -> bool {
    std::fs::symlink_metadata(path)
        .map(|md| md.file_type().is_file())
        .unwrap_or(false)
}
