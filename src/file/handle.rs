/*!
 * File Handle
 *
 * Owning handle over one open descriptor with close-once semantics.
 *
 * ## Ownership
 *
 * A handle is move-only and `!Sync`. There is no way to hold two handles to
 * the same descriptor: ownership leaves a handle only through [`FileHandle::detach`],
 * which invalidates it, or through [`FileHandle::suppress_close`], after which
 * the handle never closes the descriptor itself.
 */

use super::types::{Line, Removal, Stat};
use crate::core::constants::INVALID_FD;
use crate::core::errors::{FileError, FileResult};
use crate::core::guard::CursorGuard;
use crate::path;
use nix::errno::Errno;
use nix::fcntl::{fcntl, FcntlArg};
use std::cell::Cell;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::os::unix::io::{AsRawFd, IntoRawFd, OwnedFd, RawFd};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

/// Handle owning an open descriptor
///
/// # Example
///
/// ```rust,ignore
/// let handle = FileHandle::open("/etc/suex.conf", OpenOptions::new().read(true))?;
/// if handle.is_secure()? {
///     handle.read_lines(|line| parse(line.number, &line.text))?;
/// }
/// // Descriptor closed on drop
/// ```
pub struct FileHandle {
    file: Option<File>,
    fd: RawFd,
    path: PathBuf,
    descriptor_path: PathBuf,
    auto_close: bool,
    opened_at: Instant,
    _not_sync: PhantomData<Cell<()>>,
}

impl FileHandle {
    /// Take ownership of an already-open descriptor
    ///
    /// The path the descriptor refers to is resolved once, here. If that
    /// fails the descriptor is closed and the error returned.
    pub fn new(fd: OwnedFd) -> FileResult<Self> {
        let raw = fd.as_raw_fd();
        let path = path::readlink(raw)?;

        Ok(Self {
            file: Some(File::from(fd)),
            fd: raw,
            path,
            descriptor_path: path::get_path(raw),
            auto_close: true,
            opened_at: Instant::now(),
            _not_sync: PhantomData,
        })
    }

    /// Take ownership of an open `File`
    pub fn from_file(file: File) -> FileResult<Self> {
        Self::new(OwnedFd::from(file))
    }

    /// Open `path` with `options` and wrap the resulting descriptor
    pub fn open(path: impl AsRef<Path>, options: &OpenOptions) -> FileResult<Self> {
        let path = path.as_ref();
        let file = options
            .open(path)
            .map_err(|e| FileError::io(format!("error opening '{}'", path.display()), e))?;
        Self::from_file(file)
    }

    /// Descriptor number, or `-1` once the handle is invalid
    #[inline]
    pub fn fd(&self) -> RawFd {
        self.fd
    }

    /// Filesystem path resolved when the handle was created
    ///
    /// May be stale if the file was renamed or unlinked since.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Descriptor-table pseudo-path, e.g. `/proc/<pid>/fd/<fd>`
    #[inline]
    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    /// Fresh metadata snapshot
    pub fn stat(&self) -> FileResult<Stat> {
        let context = "could not get file status of";
        let md = self.live(context)?.metadata().map_err(|e| self.error(context, e))?;
        Ok(Stat::from(&md))
    }

    /// Current length in bytes
    pub fn size(&self) -> FileResult<u64> {
        Ok(self.stat()?.size)
    }

    /// Current `st_mode`, including the file type bits
    pub fn mode(&self) -> FileResult<u32> {
        Ok(self.stat()?.mode)
    }

    /// Current cursor position
    pub fn tell(&self) -> FileResult<u64> {
        self.seek(SeekFrom::Current(0))
    }

    /// Move the cursor, returning the new offset from the start
    pub fn seek(&self, pos: SeekFrom) -> FileResult<u64> {
        let context = "error seeking";
        let mut file = self.live(context)?;
        file.seek(pos).map_err(|e| self.error(context, e))
    }

    /// Single read into `buf`; `Ok(0)` means end of file
    pub fn read(&self, buf: &mut [u8]) -> FileResult<usize> {
        let context = "couldn't read from fd";
        let mut file = self.live(context)?;
        file.read(buf).map_err(|e| self.error(context, e))
    }

    /// Single write from `buf`
    ///
    /// Short writes are returned as-is; retrying is up to the caller.
    pub fn write(&self, buf: &[u8]) -> FileResult<usize> {
        let context = "couldn't write to fd";
        let mut file = self.live(context)?;
        file.write(buf).map_err(|e| self.error(context, e))
    }

    /// Whether the descriptor is still open
    ///
    /// Asks the kernel with `F_GETFD`, so a descriptor closed behind the
    /// handle's back reports `false`.
    pub fn is_valid(&self) -> bool {
        self.file.is_some() && fcntl(self.fd, FcntlArg::F_GETFD).is_ok()
    }

    /// Unlink the path this handle refers to, then invalidate the handle
    ///
    /// The handle is invalidated whether or not the unlink succeeds. A missing
    /// file is reported as [`Removal::AlreadyAbsent`] when `silent` is set and
    /// as an error otherwise.
    ///
    /// The outcome reflects the unlink only. If closing the descriptor fails
    /// during invalidation, the failure is logged at `warn` level and the
    /// handle is still invalid; call [`FileHandle::close`] first to see it.
    pub fn remove(&mut self, silent: bool) -> FileResult<Removal> {
        let result = nix::unistd::unlink(self.path.as_path());
        self.invalidate();

        match result {
            Ok(()) => {
                debug!(path = %self.path.display(), "removed file");
                Ok(Removal::Removed)
            }
            Err(Errno::ENOENT) if silent => Ok(Removal::AlreadyAbsent),
            Err(e) => Err(FileError::io(self.path.display().to_string(), e)),
        }
    }

    /// Close the descriptor
    ///
    /// No-op on an invalid handle. The handle is invalid afterwards even if
    /// `close(2)` reports an error.
    pub fn close(&mut self) -> FileResult<()> {
        let fd = self.fd;
        let valid = self.is_valid();
        let file = self.file.take();
        self.fd = INVALID_FD;

        let Some(file) = file else {
            return Ok(());
        };

        if !valid {
            // Already closed elsewhere; the number may have been reused.
            let _ = file.into_raw_fd();
            return Ok(());
        }

        nix::unistd::close(file.into_raw_fd())
            .map_err(|e| FileError::io(format!("error closing '{}'", fd), e))?;
        debug!(fd, lifetime_micros = self.opened_at.elapsed().as_micros() as u64, "closed fd");
        Ok(())
    }

    /// Stop this handle from closing its descriptor on drop
    ///
    /// Used when the descriptor is handed to something that outlives the
    /// handle, such as an exec'd child.
    pub fn suppress_close(&mut self) {
        self.auto_close = false;
    }

    /// Whether dropping the handle closes the descriptor
    #[inline]
    pub fn closes_on_drop(&self) -> bool {
        self.auto_close
    }

    /// Move the descriptor out of the handle, invalidating it
    ///
    /// Returns `None` if the handle was already invalid.
    pub fn detach(mut self) -> Option<OwnedFd> {
        let file = self.file.take();
        self.fd = INVALID_FD;
        file.map(OwnedFd::from)
    }

    /// Call `callback` for every line from the start of the file
    ///
    /// The cursor is restored to its previous position afterwards, also when
    /// reading fails.
    pub fn read_lines<F>(&self, mut callback: F) -> FileResult<()>
    where
        F: FnMut(&Line),
    {
        let context = "error reading lines from";
        let file = self.live(context)?;
        let _cursor = CursorGuard::save(file, self.fd)?;

        let mut start = file;
        start.seek(SeekFrom::Start(0)).map_err(|e| self.error(context, e))?;

        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        let mut number = 0;
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| self.error(context, e))?;
            if read == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
            }

            number += 1;
            callback(&Line {
                number,
                text: String::from_utf8_lossy(&buf).into_owned(),
            });
        }

        Ok(())
    }

    /// Open file behind the handle, or an `Io` error naming `action`
    pub(super) fn live(&self, action: &str) -> FileResult<&File> {
        self.file
            .as_ref()
            .ok_or_else(|| FileError::closed(format!("{} '{}'", action, self.fd)))
    }

    pub(super) fn error(&self, action: &str, err: impl fmt::Display) -> FileError {
        FileError::io(format!("{} '{}'", action, self.fd), err)
    }

    /// Drop ownership of the descriptor, closing it unless suppressed
    fn invalidate(&mut self) {
        if self.auto_close {
            if let Err(e) = self.close() {
                warn!(path = %self.path.display(), error = %e, "failed to close fd");
            }
        } else if let Some(file) = self.file.take() {
            let _ = file.into_raw_fd();
        }
        self.fd = INVALID_FD;
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' (fd {})", self.path.display(), self.fd)
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("fd", &self.fd)
            .field("path", &self.path)
            .field("auto_close", &self.auto_close)
            .finish()
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        if self.file.is_some() {
            self.invalidate();
        }
    }
}
