/*!
 * Descriptor Paths
 * Map an open descriptor back to the filesystem path it refers to
 */

use crate::core::constants::DESCRIPTOR_TABLE_ROOT;
use crate::core::errors::{FileError, FileResult};
use std::os::unix::io::RawFd;
use std::path::PathBuf;

/// Descriptor-table pseudo-path for `fd` in the current process
///
/// Pure formatting; the descriptor is not checked.
#[cfg(target_os = "linux")]
pub fn get_path(fd: RawFd) -> PathBuf {
    PathBuf::from(format!(
        "{}/{}/fd/{}",
        DESCRIPTOR_TABLE_ROOT,
        nix::unistd::getpid(),
        fd
    ))
}

/// Descriptor-table pseudo-path for `fd` in the current process
///
/// Pure formatting; the descriptor is not checked.
#[cfg(not(target_os = "linux"))]
pub fn get_path(fd: RawFd) -> PathBuf {
    PathBuf::from(format!("{}/{}", DESCRIPTOR_TABLE_ROOT, fd))
}

/// Resolve the real path `fd` currently refers to
///
/// Reads the descriptor-table symlink. If the file was unlinked after being
/// opened the kernel reports the old path with a ` (deleted)` suffix.
#[cfg(not(target_os = "macos"))]
pub fn readlink(fd: RawFd) -> FileResult<PathBuf> {
    let link = get_path(fd);
    nix::fcntl::readlink(&link)
        .map(PathBuf::from)
        .map_err(|e| FileError::io(format!("couldn't readlink '{}'", link.display()), e))
}

/// Resolve the real path `fd` currently refers to
///
/// macOS has no descriptor-table symlinks, so ask the kernel with `F_GETPATH`.
#[cfg(target_os = "macos")]
pub fn readlink(fd: RawFd) -> FileResult<PathBuf> {
    use nix::libc;
    use std::ffi::CStr;
    use std::os::unix::ffi::OsStrExt;

    let mut buf = vec![0 as libc::c_char; libc::PATH_MAX as usize + 1];
    // SAFETY: F_GETPATH writes at most PATH_MAX bytes including the NUL, and
    // the buffer is one byte larger than that.
    let rc = unsafe { libc::fcntl(fd, libc::F_GETPATH, buf.as_mut_ptr()) };
    if rc < 0 {
        return Err(FileError::io(
            format!("couldn't resolve path of fd '{}'", fd),
            std::io::Error::last_os_error(),
        ));
    }

    // SAFETY: the buffer is zero-initialized and longer than any result.
    let path = unsafe { CStr::from_ptr(buf.as_ptr()) };
    Ok(PathBuf::from(std::ffi::OsStr::from_bytes(path.to_bytes())))
}
