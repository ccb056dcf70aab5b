/*!
 * Privileged Clone
 * Copy one handle's content into another and re-secure the destination
 */

use super::handle::FileHandle;
use crate::core::errors::{FileError, FileResult};
use crate::core::guard::CursorGuard;
use std::fs::{File, Permissions};
use std::io::{Seek, SeekFrom};
use std::os::unix::fs::{fchown, PermissionsExt};
use std::os::unix::io::RawFd;
use tracing::debug;

impl FileHandle {
    /// Replace `dest`'s content with this file's, then give `dest` this
    /// file's owner and group and the permission bits `mode`
    ///
    /// Both cursors are restored before returning, whether or not the clone
    /// succeeded.
    ///
    /// # Errors
    ///
    /// - `FileError::Io` if the content could not be copied
    /// - `FileError::Permission` if `dest`'s owner, group or mode could not
    ///   be changed
    pub fn clone_to(&self, dest: &mut FileHandle, mode: u32) -> FileResult<()> {
        let src = self.live("can't clone")?;
        let dst = dest.live("can't clone to")?;
        let st = self.stat()?;

        debug!(
            source = %self.path().display(),
            bytes = st.size,
            destination = %dest.path().display(),
            "cloning"
        );

        let _src_cursor = CursorGuard::save(src, self.fd())?;
        let _dst_cursor = CursorGuard::save(dst, dest.fd())?;
        rewind(src).map_err(|e| self.error("error seeking", e))?;
        rewind(dst).map_err(|e| dest.error("error seeking", e))?;

        transfer(dst, src, st.size).map_err(|e| {
            FileError::io(
                format!("can't clone '{}' to '{}'", self.fd(), dest.fd()),
                e,
            )
        })?;
        dst.set_len(st.size)
            .map_err(|e| dest.error("error truncating", e))?;

        apply_owner(dst, dest.fd(), st.uid, st.gid)?;
        apply_mode(dst, dest.fd(), mode)
    }
}

fn apply_owner(dst: &File, fd: RawFd, uid: u32, gid: u32) -> FileResult<()> {
    fchown(dst, Some(uid), Some(gid))
        .map_err(|e| FileError::permission(format!("error on chown '{}'", fd), e))
}

fn apply_mode(dst: &File, fd: RawFd, mode: u32) -> FileResult<()> {
    dst.set_permissions(Permissions::from_mode(mode))
        .map_err(|e| FileError::permission(format!("error on chmod '{}'", fd), e))
}

fn rewind(file: &File) -> std::io::Result<u64> {
    let mut file = file;
    file.seek(SeekFrom::Start(0))
}

/// Kernel-side copy of `count` bytes from `src`'s cursor to `dst`'s cursor
#[cfg(target_os = "linux")]
fn transfer(dst: &File, src: &File, count: u64) -> std::io::Result<()> {
    use nix::sys::sendfile::sendfile;
    use std::os::unix::io::AsFd;

    let mut remaining = count;
    while remaining > 0 {
        let chunk = usize::try_from(remaining).unwrap_or(usize::MAX);
        let sent = sendfile(dst.as_fd(), src.as_fd(), None, chunk)?;
        if sent == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("source ended after {} of {} bytes", count - remaining, count),
            ));
        }
        remaining -= sent as u64;
    }
    Ok(())
}

/// Copy of `count` bytes from `src`'s cursor to `dst`'s cursor
#[cfg(not(target_os = "linux"))]
fn transfer(dst: &File, src: &File, count: u64) -> std::io::Result<()> {
    use std::io::Read;

    let mut reader = src.take(count);
    let mut writer = dst;
    let copied = std::io::copy(&mut reader, &mut writer)?;
    if copied != count {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("source ended after {} of {} bytes", copied, count),
        ));
    }
    Ok(())
}
