/*!
 * File Types
 * Snapshots and records produced by file handles
 */

use crate::core::constants::PERMISSION_MASK;
use serde::{Deserialize, Serialize};
use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;

/// Point-in-time descriptor metadata
///
/// Never cached: every query on a handle takes a fresh snapshot, so two
/// snapshots may differ if the file is modified concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub size: u64,
    /// Full `st_mode`, including the file type bits
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
}

impl Stat {
    /// rwx bits for owner, group and others
    #[inline]
    pub fn permissions(&self) -> u32 {
        self.mode & PERMISSION_MASK
    }
}

impl From<&Metadata> for Stat {
    fn from(md: &Metadata) -> Self {
        Self {
            size: md.size(),
            mode: md.mode(),
            uid: md.uid(),
            gid: md.gid(),
        }
    }
}

/// One line produced while scanning a handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number
    pub number: usize,
    /// Line content without the trailing newline
    pub text: String,
}

/// Outcome of [`FileHandle::remove`](super::FileHandle::remove)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Removal {
    Removed,
    /// Nothing was at the path; only reported for silent removals
    AlreadyAbsent,
}

impl Removal {
    #[inline]
    pub fn is_removed(self) -> bool {
        self == Removal::Removed
    }
}
