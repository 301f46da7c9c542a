//! Builder for [`Bootstrap`].
//!
//! ```text
//! Bootstrap::builder(cfg)
//!     .with_loader(loader)        // or .with_services(handles)
//!     .with_gate(gate)            // optional, shared with the embedder
//!     .build()
//! ```

use std::sync::Arc;

use crate::config::BootstrapConfig;
use crate::services::{ServiceHandle, ServiceLoader, StaticLoader};

use super::bootstrap::Bootstrap;
use super::gate::TerminationGate;

/// Builder for constructing a [`Bootstrap`].
pub struct BootstrapBuilder {
    cfg: BootstrapConfig,
    loader: Option<Arc<dyn ServiceLoader>>,
    gate: TerminationGate,
}

impl BootstrapBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: BootstrapConfig) -> Self {
        Self {
            cfg,
            loader: None,
            gate: TerminationGate::new(),
        }
    }

    /// Sets the service discovery mechanism.
    pub fn with_loader(mut self, loader: impl ServiceLoader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Discovers exactly `services`, in this order.
    pub fn with_services(self, services: Vec<ServiceHandle>) -> Self {
        self.with_loader(StaticLoader::new(services))
    }

    /// Uses an externally owned gate, so the embedder can end the run phase.
    pub fn with_gate(mut self, gate: TerminationGate) -> Self {
        self.gate = gate;
        self
    }

    /// Builds the bootstrap. Without a loader nothing is discovered and `run`
    /// fails with `RegistryMissing`.
    pub fn build(self) -> Bootstrap {
        let loader = self
            .loader
            .unwrap_or_else(|| Arc::new(StaticLoader::default()));
        Bootstrap::new_internal(self.cfg, loader, self.gate)
    }
}
