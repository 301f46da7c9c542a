//! # Service abstraction and discovered service handles.
//!
//! This module defines the [`Service`] trait and the [`ServiceHandle`] tagged union
//! that the bootstrap works with after discovery.
//!
//! A handle fixes the capabilities of a service at discovery time:
//! ```text
//! ServiceHandle::Plain(svc)           no tags, never basic
//! ServiceHandle::Tagged{svc, tags}    basic if any tag is in the vocabulary
//! ServiceHandle::Registry(reg)        the registry capability, classified first
//! ```
//!
//! Services a registry must be able to look up by type (the registry itself, the
//! CLI provider, the event bus) declare them through
//! [`Service::capabilities`], using the closed [`Capability`] set.

use std::fmt;
use std::sync::Arc;

use crate::cli::CliConfigProvider;
use crate::error::ActivationError;
use crate::events::EventBusRef;
use crate::registry::RegistryRef;

use super::Tag;

/// Shared reference to a service (`Arc<dyn Service>`).
pub type ServiceRef = Arc<dyn Service>;

/// # A unit of functionality managed by the registry.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use bootvisor::{Service, ServiceHandle, Tag};
///
/// struct Profiles;
///
/// impl Service for Profiles {
///     fn name(&self) -> &str { "profiles" }
/// }
///
/// let handle = ServiceHandle::tagged(Arc::new(Profiles), [Tag::PROFILE]);
/// assert_eq!(handle.name(), "profiles");
/// ```
pub trait Service: Send + Sync + 'static {
    /// Human-readable name (for logs and diagnostics).
    ///
    /// Defaults to the concrete type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called once by the registry when the service is activated.
    fn activate(&self) -> Result<(), ActivationError> {
        Ok(())
    }

    /// Capabilities the registry can look this service up by.
    fn capabilities(self: Arc<Self>) -> Vec<Capability> {
        Vec::new()
    }
}

/// Typed facet a service exposes for lookup.
#[derive(Clone)]
pub enum Capability {
    Registry(RegistryRef),
    CliConfig(Arc<CliConfigProvider>),
    EventBus(EventBusRef),
}

impl Capability {
    /// Returns the lookup key of this capability.
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Capability::Registry(_) => CapabilityKind::Registry,
            Capability::CliConfig(_) => CapabilityKind::CliConfig,
            Capability::EventBus(_) => CapabilityKind::EventBus,
        }
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Capability").field(&self.kind()).finish()
    }
}

/// Lookup key for [`Capability`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Registry,
    CliConfig,
    EventBus,
}

impl CapabilityKind {
    /// Type name reported when a required capability is missing.
    pub fn type_name(self) -> &'static str {
        match self {
            CapabilityKind::Registry => "bootvisor::Registry",
            CapabilityKind::CliConfig => "bootvisor::CliConfigProvider",
            CapabilityKind::EventBus => "bootvisor::EventBus",
        }
    }
}

/// Discovered service with its capabilities resolved.
#[derive(Clone)]
pub enum ServiceHandle {
    /// Service without tags.
    Plain(ServiceRef),
    /// Service carrying one or more tags.
    Tagged { service: ServiceRef, tags: Arc<[Tag]> },
    /// Service registry.
    Registry(RegistryRef),
}

impl ServiceHandle {
    pub fn plain(service: ServiceRef) -> Self {
        ServiceHandle::Plain(service)
    }

    pub fn tagged<I>(service: ServiceRef, tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Tag>,
    {
        ServiceHandle::Tagged {
            service,
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn registry(registry: RegistryRef) -> Self {
        ServiceHandle::Registry(registry)
    }

    /// Service name.
    pub fn name(&self) -> &str {
        match self {
            ServiceHandle::Plain(service) | ServiceHandle::Tagged { service, .. } => service.name(),
            ServiceHandle::Registry(registry) => registry.name(),
        }
    }

    /// Tags of the service, or `None` when it has no tag capability.
    pub fn tags(&self) -> Option<&[Tag]> {
        match self {
            ServiceHandle::Tagged { tags, .. } => Some(&**tags),
            _ => None,
        }
    }

    /// True if the service carries `tag`.
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags().is_some_and(|tags| tags.contains(tag))
    }

    /// True if the service carries at least one tag from `vocabulary`.
    pub fn has_any_tag(&self, vocabulary: &[Tag]) -> bool {
        self.tags()
            .is_some_and(|tags| tags.iter().any(|t| vocabulary.contains(t)))
    }

    /// Returns the registry capability, if any.
    pub fn as_registry(&self) -> Option<&RegistryRef> {
        match self {
            ServiceHandle::Registry(registry) => Some(registry),
            _ => None,
        }
    }

    /// Capabilities declared by the underlying service.
    pub fn capabilities(&self) -> Vec<Capability> {
        match self {
            ServiceHandle::Plain(service) | ServiceHandle::Tagged { service, .. } => {
                Arc::clone(service).capabilities()
            }
            ServiceHandle::Registry(registry) => Arc::clone(registry).capabilities(),
        }
    }

    /// Activates the underlying service.
    pub fn activate(&self) -> Result<(), ActivationError> {
        match self {
            ServiceHandle::Plain(service) | ServiceHandle::Tagged { service, .. } => {
                service.activate()
            }
            ServiceHandle::Registry(registry) => registry.activate(),
        }
    }

    /// True if both handles point at the same service instance.
    pub fn same_service(&self, other: &ServiceHandle) -> bool {
        self.addr() == other.addr()
    }

    fn addr(&self) -> *const () {
        match self {
            ServiceHandle::Plain(service) | ServiceHandle::Tagged { service, .. } => {
                Arc::as_ptr(service) as *const ()
            }
            ServiceHandle::Registry(registry) => Arc::as_ptr(registry) as *const (),
        }
    }
}

impl fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceHandle::Plain(_) => f.debug_tuple("Plain").field(&self.name()).finish(),
            ServiceHandle::Tagged { tags, .. } => f
                .debug_struct("Tagged")
                .field("name", &self.name())
                .field("tags", tags)
                .finish(),
            ServiceHandle::Registry(_) => f.debug_tuple("Registry").field(&self.name()).finish(),
        }
    }
}
