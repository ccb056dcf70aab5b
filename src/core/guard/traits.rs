/*!
 * Guard Traits
 *
 * Core abstractions for RAII resource guards
 */

use crate::core::errors::FileResult;

/// Core guard trait
///
/// Guards restore or release their resource exactly once, either through
/// [`Guard::release`] or on drop.
pub trait Guard {
    /// Check if guard is still active
    fn is_active(&self) -> bool;

    /// Manually release the resource
    ///
    /// Releasing an inactive guard is a no-op.
    fn release(&mut self) -> FileResult<()>;
}

/// Guards that can be dropped with custom cleanup
///
/// Separates Drop logic for better testability and observability
pub trait GuardDrop: Guard {
    /// Perform cleanup on drop
    ///
    /// # Panics
    ///
    /// Should NOT panic. Log errors instead.
    fn on_drop(&mut self);
}
