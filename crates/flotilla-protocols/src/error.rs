//! Error types for the hook-dispatch layer.

use thiserror::Error;

/// Errors surfaced by registry load/unload calls.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("hook extension '{0}' already loaded")]
    AlreadyLoaded(String),

    #[error("no hook extension named '{0}' available")]
    NotFound(String),

    #[error("failed to instantiate hook extension '{name}': {reason}")]
    InstantiationFailed { name: String, reason: String },

    #[error("hook extension '{0}' not loaded")]
    NotLoaded(String),
}

/// Error produced by a single hook invocation.
///
/// In sequential and notification dispatch these are logged and absorbed;
/// only the concurrent container-environment dispatch turns one into a
/// failure of the whole call.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HookError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Hard failure of a dispatch call.
///
/// Sequential and notification dispatch never fail as a whole, so the only
/// variant is the all-or-nothing container-environment fan-in.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("container environment decorator failed for extension '{name}': {source}")]
    ContainerEnvironment {
        name: String,
        #[source]
        source: HookError,
    },
}
