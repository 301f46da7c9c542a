//! # Service discovery boundary.
//!
//! The bootstrap does not know how services are found. A [`ServiceLoader`]
//! returns the discovered handles as an unordered collection; [`StaticLoader`]
//! is the in-process implementation backed by a fixed list.

use super::ServiceHandle;

/// Source of discovered services.
pub trait ServiceLoader: Send + Sync + 'static {
    /// Returns every discovered service.
    fn load_services(&self) -> Vec<ServiceHandle>;
}

/// Loader over a fixed set of handles.
#[derive(Clone, Debug, Default)]
pub struct StaticLoader {
    services: Vec<ServiceHandle>,
}

impl StaticLoader {
    pub fn new(services: Vec<ServiceHandle>) -> Self {
        Self { services }
    }

    /// Adds one more handle.
    pub fn with(mut self, handle: ServiceHandle) -> Self {
        self.services.push(handle);
        self
    }
}

impl FromIterator<ServiceHandle> for StaticLoader {
    fn from_iter<I: IntoIterator<Item = ServiceHandle>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl ServiceLoader for StaticLoader {
    fn load_services(&self) -> Vec<ServiceHandle> {
        self.services.clone()
    }
}
