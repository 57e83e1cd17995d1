//! Registry of loaded hook extensions.

use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use tracing::info;

use flotilla_protocols::error::RegistryError;
use flotilla_protocols::hook::Hook;
use flotilla_protocols::resolver::HookResolver;

/// A loaded extension: its registered name and instance.
#[derive(Clone)]
pub struct HookEntry {
    pub name: String,
    pub hook: Arc<dyn Hook>,
}

/// Thread-safe, insertion-ordered set of loaded hook extensions.
///
/// Iteration order equals load order; that order is what makes last-wins
/// merges deterministic, so there is no re-ordering - unloading and
/// re-loading a name places it at the end.
///
/// One exclusive section serializes load/unload and the sequential
/// decorator dispatches, which iterate the entries with the lock held for
/// the whole chain of hook invocations.
pub struct HookRegistry {
    resolver: Arc<dyn HookResolver>,
    entries: Mutex<Vec<HookEntry>>,
}

impl HookRegistry {
    /// Create a registry backed by the given module resolver.
    pub fn new(resolver: Arc<dyn HookResolver>) -> Self {
        Self {
            resolver,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Load the extensions named in a comma-separated list, in order.
    ///
    /// Empty segments are ignored, so a trailing comma is harmless.
    pub fn initialize(&self, list: &str) -> Result<(), RegistryError> {
        self.load(list.split(',').map(str::trim).filter(|s| !s.is_empty()))
    }

    /// Load the named extensions, in order.
    ///
    /// Stops at the first name that fails; names loaded earlier in the same
    /// call stay loaded. There is no rollback.
    pub fn load<I, S>(&self, names: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = self.entries.lock();

        for name in names {
            let name = name.as_ref();

            if entries.iter().any(|e| e.name == name) {
                return Err(RegistryError::AlreadyLoaded(name.to_string()));
            }

            if !self.resolver.contains(name) {
                return Err(RegistryError::NotFound(name.to_string()));
            }

            let hook = self.resolver.instantiate(name).map_err(|e| {
                RegistryError::InstantiationFailed {
                    name: name.to_string(),
                    reason: e.to_string(),
                }
            })?;

            entries.push(HookEntry {
                name: name.to_string(),
                hook,
            });
            info!("Hook extension loaded: {}", name);
        }

        Ok(())
    }

    /// Unload the named extension.
    pub fn unload(&self, name: &str) -> Result<(), RegistryError> {
        let mut entries = self.entries.lock();

        let index = entries
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| RegistryError::NotLoaded(name.to_string()))?;

        entries.remove(index);
        info!("Hook extension unloaded: {}", name);
        Ok(())
    }

    /// Whether no extensions are loaded.
    ///
    /// Callers use this to skip dispatch entirely; a dispatch with zero
    /// extensions is still a no-op returning its input unchanged.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Names of the loaded extensions, in load order.
    pub fn names(&self) -> Vec<String> {
        self.entries.lock().iter().map(|e| e.name.clone()).collect()
    }

    /// Exclusive access to the entries for a full decorator chain.
    pub(crate) fn locked(&self) -> MutexGuard<'_, Vec<HookEntry>> {
        self.entries.lock()
    }

    /// Copy of the entries for dispatch outside the lock.
    pub(crate) fn snapshot(&self) -> Vec<HookEntry> {
        self.entries.lock().clone()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
