/*!
 * Trust Policy
 * Decide whether a file's ownership and permission bits make it trustworthy
 */

use super::handle::FileHandle;
use super::types::Stat;
use crate::core::constants::{ROOT_GROUP, TRUSTED_OWNER, TRUSTED_PERMISSIONS};
use crate::core::errors::FileResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason a file failed the trust check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "violation")]
pub enum TrustViolation {
    /// Permission bits differ from the required pattern
    Permissions { actual: u32, expected: u32 },
    /// Owned by someone other than root
    Owner { uid: u32 },
    /// Group is root's primary group
    RootGroup,
}

impl fmt::Display for TrustViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustViolation::Permissions { actual, expected } => {
                write!(f, "permissions {:o} (expected {:o})", actual, expected)
            }
            TrustViolation::Owner { uid } => write!(f, "owned by uid {}", uid),
            TrustViolation::RootGroup => write!(f, "group is root"),
        }
    }
}

/// Verdict of a trust evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "trust", content = "violations")]
pub enum Trust {
    Trusted,
    Untrusted(Vec<TrustViolation>),
}

impl Trust {
    #[inline]
    pub fn is_trusted(&self) -> bool {
        matches!(self, Trust::Trusted)
    }

    pub fn violations(&self) -> &[TrustViolation] {
        match self {
            Trust::Trusted => &[],
            Trust::Untrusted(violations) => violations,
        }
    }
}

/// Fixed trust pattern: exactly `r--r-----`, owned by root, group not root
///
/// Evaluation only looks at permission bits, owner and group; size and file
/// type never affect the outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustPolicy;

impl TrustPolicy {
    pub fn evaluate(&self, stat: &Stat) -> Trust {
        let mut violations = Vec::new();

        if stat.permissions() != TRUSTED_PERMISSIONS {
            violations.push(TrustViolation::Permissions {
                actual: stat.permissions(),
                expected: TRUSTED_PERMISSIONS,
            });
        }
        if stat.uid != TRUSTED_OWNER {
            violations.push(TrustViolation::Owner { uid: stat.uid });
        }
        if stat.gid == ROOT_GROUP {
            violations.push(TrustViolation::RootGroup);
        }

        if violations.is_empty() {
            Trust::Trusted
        } else {
            Trust::Untrusted(violations)
        }
    }
}

impl FileHandle {
    /// Evaluate the trust policy against a fresh stat snapshot
    pub fn trust(&self) -> FileResult<Trust> {
        Ok(TrustPolicy.evaluate(&self.stat()?))
    }

    /// `true` when the file is trusted: mode exactly 0440, owner root,
    /// group anything but root
    pub fn is_secure(&self) -> FileResult<bool> {
        Ok(self.trust()?.is_trusted())
    }
}
