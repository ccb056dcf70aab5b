/*!
 * Secure FD Library
 * Descriptor handles and path resolution for a privileged execution helper
 */

pub mod core;
pub mod file;
pub mod logging;
pub mod path;

// Re-exports
pub use crate::core::{FileError, FileResult};
pub use file::{FileHandle, Line, Removal, Stat, Trust, TrustPolicy, TrustViolation};
pub use logging::init_tracing;
pub use path::{exists, get_path, locate, locate_in_env, readlink, SearchPath};
