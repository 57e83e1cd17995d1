//! # Flotilla Protocols
//!
//! Interface definitions for the Flotilla hook-dispatch layer.
//! Contains only interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`Hook`] - The capability interface extensions implement, one
//!   independently-optional method per lifecycle event
//! - [`HookResolver`] - Boundary to the module-loading subsystem
//!
//! The [`descriptor`] module holds the payload value objects handed to
//! hooks; [`error`] holds the registry, per-invocation, and dispatch error
//! taxonomy.

pub mod descriptor;
pub mod error;
pub mod hook;
pub mod resolver;

pub use descriptor::*;
pub use error::{DispatchError, HookError, RegistryError};
pub use hook::{Decoration, Hook};
pub use resolver::HookResolver;
