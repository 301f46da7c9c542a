//! # Registry capability.
//!
//! A [`Registry`] stores services, finds them by capability and activates them by tag.
//! It is itself a [`Service`] and is expected to resolve itself through
//! [`Registry::find`], which lets an implementation hand out a decorated instance
//! once basic services are registered.

use std::fmt;
use std::sync::Arc;

use crate::cli::CliConfigProvider;
use crate::error::ActivationError;
use crate::events::EventBusRef;
use crate::services::{Capability, CapabilityKind, Service, ServiceHandle, Tag};

/// Shared reference to a registry (`Arc<dyn Registry>`).
pub type RegistryRef = Arc<dyn Registry>;

/// # Service registry.
///
/// Registration and activation happen on the bootstrap task before anything
/// concurrent is started; implementations still must be `Send + Sync` because
/// the resolved registry outlives the bootstrap sequence.
pub trait Registry: Service {
    /// Registers services in one batch.
    fn register(&self, services: Vec<ServiceHandle>);

    /// Finds a service exposing the given capability.
    fn find(&self, kind: CapabilityKind) -> Option<Capability>;

    /// Activates every registered service carrying `tag`.
    fn activate_tagged(&self, tag: &Tag) -> Result<(), ActivationError>;
}

impl dyn Registry {
    /// Finds the registry capability (usually the registry itself).
    pub fn find_registry(&self) -> Option<RegistryRef> {
        match self.find(CapabilityKind::Registry)? {
            Capability::Registry(registry) => Some(registry),
            _ => None,
        }
    }

    /// Finds the command line config provider.
    pub fn find_cli_provider(&self) -> Option<Arc<CliConfigProvider>> {
        match self.find(CapabilityKind::CliConfig)? {
            Capability::CliConfig(provider) => Some(provider),
            _ => None,
        }
    }

    /// Finds the lifecycle event bus.
    pub fn find_event_bus(&self) -> Option<EventBusRef> {
        match self.find(CapabilityKind::EventBus)? {
            Capability::EventBus(bus) => Some(bus),
            _ => None,
        }
    }
}

impl fmt::Debug for dyn Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Registry").field(&self.name()).finish()
    }
}
