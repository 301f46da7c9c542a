//! # Partition of the discovered services.
//!
//! [`Classification::classify`] splits the discovered handles into three
//! mutually exclusive sequences, preserving discovery order within each:
//!
//! ```text
//! for each handle:
//!   ├─ Registry            ─► registries   (tags are never inspected)
//!   ├─ Tagged, basic tag   ─► basic
//!   ├─ Tagged, other tags  ─► other
//!   └─ Plain               ─► other
//! ```

use std::fmt;

use crate::registry::RegistryRef;

use super::{ServiceHandle, Tag};

/// Discovered services split into registries, basic and other services.
#[derive(Clone, Default)]
pub struct Classification {
    /// Registry-capable services.
    pub registries: Vec<RegistryRef>,
    /// Services carrying at least one basic tag.
    pub basic: Vec<ServiceHandle>,
    /// Everything else; handed to the application through the startup event.
    pub other: Vec<ServiceHandle>,
}

impl Classification {
    /// Classifies `services` against the `basic` tag vocabulary.
    pub fn classify<I>(services: I, basic: &[Tag]) -> Self
    where
        I: IntoIterator<Item = ServiceHandle>,
    {
        let mut out = Self::default();
        for handle in services {
            match handle {
                ServiceHandle::Registry(registry) => out.registries.push(registry),
                handle if handle.has_any_tag(basic) => out.basic.push(handle),
                handle => out.other.push(handle),
            }
        }
        out
    }

    /// Total number of classified services.
    pub fn len(&self) -> usize {
        self.registries.len() + self.basic.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registries: Vec<&str> = self.registries.iter().map(|r| r.name()).collect();
        f.debug_struct("Classification")
            .field("registries", &registries)
            .field("basic", &self.basic)
            .field("other", &self.other)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::registry::LocalRegistry;
    use crate::services::{BASIC_TAGS, Service, ServiceRef};

    struct Named(&'static str);

    impl Service for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    fn svc(name: &'static str) -> ServiceRef {
        Arc::new(Named(name))
    }

    fn names(handles: &[ServiceHandle]) -> Vec<&str> {
        handles.iter().map(ServiceHandle::name).collect()
    }

    #[test]
    fn test_empty_input_yields_empty_sequences() {
        let c = Classification::classify(Vec::new(), &BASIC_TAGS);
        assert!(c.is_empty());
        assert!(c.registries.is_empty() && c.basic.is_empty() && c.other.is_empty());
    }

    #[test]
    fn test_partition_keeps_discovery_order() {
        let handles = vec![
            ServiceHandle::tagged(svc("log"), [Tag::LOG]),
            ServiceHandle::plain(svc("plain")),
            ServiceHandle::tagged(svc("web"), ["http"]),
            ServiceHandle::tagged(svc("cfg"), ["http", "config"]),
            ServiceHandle::registry(LocalRegistry::new()),
        ];
        let c = Classification::classify(handles, &BASIC_TAGS);

        assert_eq!(c.registries.len(), 1);
        assert_eq!(names(&c.basic), ["log", "cfg"]);
        assert_eq!(names(&c.other), ["plain", "web"]);
        assert_eq!(c.len(), 5);
    }

    #[test]
    fn test_registry_is_never_tag_checked() {
        // A registry-capable service only ever lands in `registries`.
        let c = Classification::classify(
            vec![ServiceHandle::registry(LocalRegistry::new())],
            &BASIC_TAGS,
        );
        assert_eq!(c.registries.len(), 1);
        assert!(c.basic.is_empty());
        assert!(c.other.is_empty());
    }

    #[test]
    fn test_custom_vocabulary() {
        let handles = vec![
            ServiceHandle::tagged(svc("log"), [Tag::LOG]),
            ServiceHandle::tagged(svc("web"), ["http"]),
        ];
        let c = Classification::classify(handles, &[Tag::from("http")]);
        assert_eq!(names(&c.basic), ["web"]);
        assert_eq!(names(&c.other), ["log"]);
    }
}
