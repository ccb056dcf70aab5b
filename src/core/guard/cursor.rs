/*!
 * Cursor Guards
 *
 * Save a descriptor's cursor position and restore it on every exit path
 */

use super::traits::{Guard, GuardDrop};
use crate::core::errors::{FileError, FileResult};
use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::os::unix::io::RawFd;
use tracing::warn;

/// Restores a descriptor's cursor when dropped
///
/// The cursor lives on the open file description, so any seek done through a
/// borrowed `&File` while the guard is alive is undone when it goes away.
///
/// # Example
///
/// ```rust,ignore
/// let cursor = CursorGuard::save(&file, fd)?;
/// (&file).seek(SeekFrom::Start(0))?;
/// // ... scan ...
/// // cursor restored here
/// ```
pub struct CursorGuard<'a> {
    file: &'a File,
    fd: RawFd,
    position: u64,
    active: bool,
}

impl<'a> CursorGuard<'a> {
    /// Record the current cursor of `file`
    pub fn save(file: &'a File, fd: RawFd) -> FileResult<Self> {
        let mut cursor = file;
        let position = cursor
            .seek(SeekFrom::Current(0))
            .map_err(|e| FileError::io(format!("error seeking '{}'", fd), e))?;

        Ok(Self {
            file,
            fd,
            position,
            active: true,
        })
    }

    /// Position that will be restored
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl Guard for CursorGuard<'_> {
    fn is_active(&self) -> bool {
        self.active
    }

    fn release(&mut self) -> FileResult<()> {
        if !self.active {
            return Ok(());
        }

        self.active = false;
        let mut cursor = self.file;
        cursor
            .seek(SeekFrom::Start(self.position))
            .map(|_| ())
            .map_err(|e| FileError::io(format!("error seeking '{}'", self.fd), e))
    }
}

impl GuardDrop for CursorGuard<'_> {
    fn on_drop(&mut self) {
        if self.active {
            if let Err(e) = self.release() {
                warn!(
                    fd = self.fd,
                    position = self.position,
                    error = %e,
                    "failed to restore cursor"
                );
            }
        }
    }
}

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        self.on_drop();
    }
}
