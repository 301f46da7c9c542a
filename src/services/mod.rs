//! # Services, tags and discovery.
//!
//! This module provides the service-side data model:
//! - [`Service`] - trait implemented by every managed service
//! - [`ServiceHandle`] - discovered service with resolved capabilities
//! - [`Capability`] / [`CapabilityKind`] - typed facets a registry can look up
//! - [`Tag`] / [`BASIC_TAGS`] - labels and the basic-service vocabulary
//! - [`Classification`] - partition into registries, basic and other services
//! - [`ServiceLoader`] / [`StaticLoader`] - discovery boundary

mod classify;
mod loader;
mod service;
mod tag;

pub use classify::Classification;
pub use loader::{ServiceLoader, StaticLoader};
pub use service::{Capability, CapabilityKind, Service, ServiceHandle, ServiceRef};
pub use tag::{BASIC_TAGS, Tag};
