/*!
 * Error Types
 * Descriptor and path errors with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use nix::errno::Errno;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a descriptor or path operation
pub type FileResult<T> = Result<T, FileError>;

/// Errors surfaced by file handles and the path resolver
///
/// `Io` covers every syscall failure that is not about authorization.
/// `Permission` is reserved for failing to change the owner or mode of a
/// clone destination, so callers can tell "copy failed" apart from
/// "could not secure the copy".
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error", content = "details", rename_all = "snake_case")]
pub enum FileError {
    #[error("I/O error: {0}")]
    #[diagnostic(
        code(secure_fd::io),
        help("The descriptor may be closed or the path may not exist. Check the OS error text.")
    )]
    Io(String),

    #[error("Permission error: {0}")]
    #[diagnostic(
        code(secure_fd::permission),
        help("Changing ownership or mode usually requires elevated privileges.")
    )]
    Permission(String),
}

impl FileError {
    /// Build an `Io` error from a context string and an OS error
    pub(crate) fn io(context: impl AsRef<str>, err: impl std::fmt::Display) -> Self {
        FileError::Io(format!("{}: {}", context.as_ref(), err))
    }

    /// Build a `Permission` error from a context string and an OS error
    pub(crate) fn permission(context: impl AsRef<str>, err: impl std::fmt::Display) -> Self {
        FileError::Permission(format!("{}: {}", context.as_ref(), err))
    }

    /// Error for an operation attempted on an invalidated handle
    pub(crate) fn closed(context: impl AsRef<str>) -> Self {
        Self::io(context, std::io::Error::from(Errno::EBADF))
    }

    #[inline]
    pub fn is_io(&self) -> bool {
        matches!(self, FileError::Io(_))
    }

    #[inline]
    pub fn is_permission(&self) -> bool {
        matches!(self, FileError::Permission(_))
    }
}
