//! # In-memory registry.
//!
//! [`LocalRegistry`] keeps registered handles in registration order and answers
//! capability lookups by scanning them. The registry capability always resolves
//! to the registry itself.
//!
//! ## Rules
//! - Registering the same service instance twice is ignored (first wins)
//! - A service is activated at most once, even if it carries several basic tags
//! - Activation runs without holding the internal lock, so a service may query
//!   the registry while it activates

use std::sync::{Arc, PoisonError, RwLock, Weak};

use tracing::{debug, warn};

use crate::error::ActivationError;
use crate::services::{Capability, CapabilityKind, Service, ServiceHandle, Tag};

use super::{Registry, RegistryRef};

struct Entry {
    handle: ServiceHandle,
    activated: bool,
}

/// Registry backed by an in-memory list.
pub struct LocalRegistry {
    me: Weak<LocalRegistry>,
    entries: RwLock<Vec<Entry>>,
}

impl LocalRegistry {
    /// Creates an empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            entries: RwLock::new(Vec::new()),
        })
    }

    /// Handle for discovery.
    pub fn handle(self: &Arc<Self>) -> ServiceHandle {
        let registry: RegistryRef = self.clone();
        ServiceHandle::registry(registry)
    }

    /// Names of registered services, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|e| e.handle.name().to_string())
            .collect()
    }

    /// Names of activated services, in registration order.
    pub fn activated(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.activated)
            .map(|e| e.handle.name().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn mark_activated(&self, idx: usize) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = entries.get_mut(idx) {
            entry.activated = true;
        }
    }
}

impl Service for LocalRegistry {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn capabilities(self: Arc<Self>) -> Vec<Capability> {
        vec![Capability::Registry(self)]
    }
}

impl Registry for LocalRegistry {
    fn register(&self, services: Vec<ServiceHandle>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        for handle in services {
            if entries.iter().any(|e| e.handle.same_service(&handle)) {
                warn!(service = handle.name(), "service already registered, ignoring");
                continue;
            }
            debug!(service = handle.name(), "service registered");
            entries.push(Entry {
                handle,
                activated: false,
            });
        }
    }

    fn find(&self, kind: CapabilityKind) -> Option<Capability> {
        if kind == CapabilityKind::Registry {
            return self.me.upgrade().map(|me| Capability::Registry(me));
        }
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .flat_map(|e| e.handle.capabilities())
            .find(|c| c.kind() == kind)
    }

    fn activate_tagged(&self, tag: &Tag) -> Result<(), ActivationError> {
        let pending: Vec<(usize, ServiceHandle)> = {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            entries
                .iter()
                .enumerate()
                .filter(|(_, e)| !e.activated && e.handle.has_tag(tag))
                .map(|(idx, e)| (idx, e.handle.clone()))
                .collect()
        };

        for (idx, handle) in pending {
            handle.activate()?;
            self.mark_activated(idx);
            debug!(service = handle.name(), tag = %tag, "service activated");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::services::ServiceRef;

    #[derive(Default)]
    struct Counting {
        activations: AtomicUsize,
    }

    impl Service for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn activate(&self) -> Result<(), ActivationError> {
            self.activations.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Broken;

    impl Service for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn activate(&self) -> Result<(), ActivationError> {
            Err(ActivationError::new("broken", "no backing store"))
        }
    }

    #[test]
    fn test_registry_resolves_itself() {
        let reg = LocalRegistry::new();
        let found = reg.find(CapabilityKind::Registry);
        match found {
            Some(Capability::Registry(r)) => {
                assert_eq!(Arc::as_ptr(&r) as *const (), Arc::as_ptr(&reg) as *const ());
            }
            other => panic!("unexpected lookup result: {other:?}"),
        }
    }

    #[test]
    fn test_handle_points_at_the_registry() {
        let reg = LocalRegistry::new();
        let handle = reg.handle();
        let registry = handle.as_registry().expect("registry handle");
        assert_eq!(Arc::as_ptr(registry) as *const (), Arc::as_ptr(&reg) as *const ());
        assert!(handle.tags().is_none());
    }

    #[test]
    fn test_duplicate_registration_is_ignored() {
        let reg = LocalRegistry::new();
        let svc: ServiceRef = Arc::new(Counting::default());
        reg.register(vec![
            ServiceHandle::tagged(Arc::clone(&svc), [Tag::LOG]),
            ServiceHandle::tagged(svc, [Tag::LOG]),
        ]);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_multi_tagged_service_activates_once() {
        let reg = LocalRegistry::new();
        let svc = Arc::new(Counting::default());
        reg.register(vec![ServiceHandle::tagged(
            Arc::clone(&svc) as ServiceRef,
            [Tag::CONFIG, Tag::LOG],
        )]);

        reg.activate_tagged(&Tag::CONFIG).unwrap();
        reg.activate_tagged(&Tag::LOG).unwrap();

        assert_eq!(svc.activations.load(Ordering::SeqCst), 1);
        assert_eq!(reg.activated(), ["counting"]);
    }

    #[test]
    fn test_activation_error_propagates() {
        let reg = LocalRegistry::new();
        reg.register(vec![ServiceHandle::tagged(Arc::new(Broken), [Tag::LOG])]);

        let err = reg.activate_tagged(&Tag::LOG).unwrap_err();
        assert_eq!(err.service, "broken");
        assert!(reg.activated().is_empty());
    }

    #[test]
    fn test_unknown_capability_is_absent() {
        let reg = LocalRegistry::new();
        reg.register(vec![ServiceHandle::tagged(
            Arc::new(Counting::default()),
            [Tag::LOG],
        )]);
        assert!(reg.find(CapabilityKind::EventBus).is_none());
    }
}
