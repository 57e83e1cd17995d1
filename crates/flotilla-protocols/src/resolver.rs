//! Boundary to the module-loading subsystem.

use std::sync::Arc;

use crate::error::HookError;
use crate::hook::Hook;

/// Resolves extension names to constructed hook instances.
///
/// The module-loading and dependency-resolution subsystem sits behind this
/// trait; the registry only ever asks whether a name is known and for a new
/// instance of it.
pub trait HookResolver: Send + Sync {
    /// Whether a hook module with the given name is available.
    fn contains(&self, name: &str) -> bool;

    /// Construct a new instance of the named hook module.
    fn instantiate(&self, name: &str) -> Result<Arc<dyn Hook>, HookError>;
}
