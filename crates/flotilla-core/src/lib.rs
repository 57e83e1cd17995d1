//! # Flotilla Core
//!
//! Lifecycle-hook dispatch for the Flotilla control plane.
//!
//! ## Components
//!
//! - [`HookRegistry`] - thread-safe, insertion-ordered set of loaded hook
//!   extensions
//! - [`HookDispatcher`] - per-event invocation strategies over the registry
//! - [`StaticResolver`] - in-process module catalog for statically linked
//!   hooks
//!
//! External parties implement `flotilla_protocols::Hook` and register
//! instances by name through the registry; for each firing lifecycle event
//! the dispatcher invokes every loaded extension in load order and combines
//! their results, isolating per-extension failures from the caller.

pub mod dispatch;
pub mod registry;
pub mod resolver;

pub use dispatch::HookDispatcher;
pub use registry::{HookEntry, HookRegistry};
pub use resolver::StaticResolver;
