/*!
 * Constants
 *
 * Fixed values shared by the handle, the trust policy and the resolver.
 */

use std::os::unix::io::RawFd;

// =============================================================================
// DESCRIPTORS
// =============================================================================

/// Descriptor value held by an invalidated handle
pub const INVALID_FD: RawFd = -1;

/// Root of the per-process descriptor table pseudo-filesystem
#[cfg(target_os = "linux")]
pub const DESCRIPTOR_TABLE_ROOT: &str = "/proc";

/// Descriptor directory on platforms without /proc
#[cfg(not(target_os = "linux"))]
pub const DESCRIPTOR_TABLE_ROOT: &str = "/dev/fd";

// =============================================================================
// TRUST POLICY
// =============================================================================

/// Permission bits considered when evaluating trust (rwx for user/group/other)
pub const PERMISSION_MASK: u32 = 0o777;

/// Exact permission bits of a trusted file: owner read, group read
/// [SECURITY]
pub const TRUSTED_PERMISSIONS: u32 = 0o440;

/// Owner a trusted file must have (root)
/// [SECURITY]
pub const TRUSTED_OWNER: u32 = 0;

/// Group a trusted file must NOT have (root's primary group)
/// [SECURITY]
pub const ROOT_GROUP: u32 = 0;

// =============================================================================
// PATH RESOLUTION
// =============================================================================

/// Environment variable holding the executable search path
pub const PATH_ENV_VAR: &str = "PATH";
