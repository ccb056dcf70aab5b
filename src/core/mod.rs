/*!
 * Core Module
 * Error types, constants and RAII guards shared by handles and the resolver
 */

pub mod constants;
pub mod errors;
pub mod guard;

// Re-export for convenience
pub use errors::{FileError, FileResult};
pub use guard::{CursorGuard, Guard, GuardDrop};
