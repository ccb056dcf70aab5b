/*!
 * File Module
 * Descriptor handles, trust evaluation and privileged cloning
 */

mod clone;
mod handle;
mod security;
mod types;

// Re-exports
pub use handle::FileHandle;
pub use security::{Trust, TrustPolicy, TrustViolation};
pub use types::{Line, Removal, Stat};
