/*!
 * Search Path
 * Explicit, ordered list of directories used to resolve bare program names
 */

use crate::core::constants::PATH_ENV_VAR;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Ordered directories consulted by [`locate`](super::locate)
///
/// Built from an explicit value rather than read from the process
/// environment at lookup time, so resolution stays deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Search path over the given directories, in order
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a PATH-style value on the platform separator
    ///
    /// Empty entries are dropped: they would otherwise mean "current
    /// directory", which is never searched.
    pub fn parse(value: &OsStr) -> Self {
        Self {
            dirs: std::env::split_paths(value)
                .filter(|dir| !dir.as_os_str().is_empty())
                .collect(),
        }
    }

    /// Search path from the `PATH` environment variable
    ///
    /// Returns `None` when the variable is unset, which disables the
    /// search fallback instead of being an error.
    pub fn from_env() -> Option<Self> {
        std::env::var_os(PATH_ENV_VAR).map(|value| Self::parse(&value))
    }

    /// Directories in lookup order
    pub fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}
