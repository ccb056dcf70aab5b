/*!
 * Path Module
 * Program lookup and descriptor-to-path translation
 */

mod descriptor;
mod resolver;
mod search;

// Re-exports
pub use descriptor::{get_path, readlink};
pub use resolver::{exists, locate, locate_in_env};
pub use search::SearchPath;
