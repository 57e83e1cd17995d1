//! In-process hook module catalog.

use std::collections::HashMap;
use std::sync::Arc;

use flotilla_protocols::error::HookError;
use flotilla_protocols::hook::Hook;
use flotilla_protocols::resolver::HookResolver;

type HookFactory = Box<dyn Fn() -> Result<Arc<dyn Hook>, HookError> + Send + Sync>;

/// A [`HookResolver`] over hook modules linked into the host binary.
///
/// Embedders register one factory per module name; `instantiate` runs the
/// factory, so construction itself may fail.
pub struct StaticResolver {
    factories: HashMap<String, HookFactory>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a factory for the named hook module.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Arc<dyn Hook>, HookError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }
}

impl Default for StaticResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl HookResolver for StaticResolver {
    fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    fn instantiate(&self, name: &str) -> Result<Arc<dyn Hook>, HookError> {
        match self.factories.get(name) {
            Some(factory) => factory(),
            None => Err(HookError::failed(format!("no hook module named '{name}'"))),
        }
    }
}
