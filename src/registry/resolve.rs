//! # Registry resolution and basic-service activation.
//!
//! ```text
//! resolve_registry(classification):
//!   registries == []        ─► RegistryMissing
//!   registries == [r1, ..]  ─► RegistryAmbiguous { all of them }
//!   registries == [r]:
//!     r.register(basic)                     (one batch)
//!     r.find(Registry) ─► Some(resolved)    ─► Ok(resolved)
//!                      └► None              ─► RegistryUnsatisfied { type of r }
//!
//! activate_basics(registry, vocabulary):
//!   for tag in vocabulary (declared order) ─► registry.activate_tagged(tag)?
//! ```

use tracing::{debug, info};

use crate::error::{ActivationError, BootstrapError};
use crate::services::{Classification, Tag};

use super::{Registry, RegistryRef};

/// Selects the single registry, registers the basic services into it and
/// re-resolves the registry through itself.
pub fn resolve_registry(classes: &Classification) -> Result<RegistryRef, BootstrapError> {
    let registry = match classes.registries.as_slice() {
        [] => return Err(BootstrapError::RegistryMissing),
        [registry] => registry,
        many => {
            return Err(BootstrapError::RegistryAmbiguous {
                registries: many.to_vec(),
            });
        }
    };

    let registry_type = registry.name().to_string();
    registry.register(classes.basic.clone());
    info!(
        registry = %registry_type,
        basic = classes.basic.len(),
        "basic services registered"
    );

    let resolved = registry
        .find_registry()
        .ok_or(BootstrapError::RegistryUnsatisfied { registry_type })?;
    debug!(registry = resolved.name(), "registry resolved");
    Ok(resolved)
}

/// Activates basic services tag by tag, in vocabulary order.
pub fn activate_basics(registry: &dyn Registry, vocabulary: &[Tag]) -> Result<(), ActivationError> {
    for tag in vocabulary {
        registry.activate_tagged(tag)?;
        debug!(tag = %tag, "basic services activated");
    }
    Ok(())
}
