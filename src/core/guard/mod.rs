/*!
 * RAII Resource Guards
 *
 * Scoped guards with automatic cleanup for descriptor state.
 *
 * ## Guard Types
 *
 * - **CursorGuard**: Saves a descriptor's cursor and restores it on drop
 * - **FileHandle** (in `file`): Owns a descriptor and closes it on drop
 *
 * ## Example
 *
 * ```rust,ignore
 * let guard = CursorGuard::save(&file, fd)?;
 * // Seek and read freely
 * // Cursor restored on drop, even on early return
 * ```
 */

mod cursor;
mod traits;

pub use cursor::CursorGuard;
pub use traits::{Guard, GuardDrop};
