//! # Service registry: capability, in-memory implementation and resolution.
//!
//! - [`Registry`] - register / find-by-capability / activate-by-tag contract
//! - [`LocalRegistry`] - in-memory implementation
//! - [`resolve_registry`] - picks the single authoritative registry
//! - [`activate_basics`] - activates basic services in vocabulary order

mod local;
mod registry;
mod resolve;

pub use local::LocalRegistry;
pub use registry::{Registry, RegistryRef};
pub use resolve::{activate_basics, resolve_registry};
