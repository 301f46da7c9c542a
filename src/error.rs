//! Error types used by the bootstrap sequence and its collaborators.
//!
//! This module defines the error enums of the crate:
//!
//! - [`BootstrapError`] - fatal conditions that abort the bootstrap.
//! - [`ActivationError`] - raised by a registry when a basic service fails to activate.
//! - [`HandlerFault`] - raised by a lifecycle event handler (or converted from its panic).
//! - [`CliOptionError`] - non-fatal command line problems (reported, never aborting).
//!
//! Every enum provides `as_label` (stable snake_case label for logs/metrics).

use thiserror::Error;

use crate::registry::RegistryRef;

/// # Fatal errors produced by the bootstrap sequence.
///
/// Each variant carries enough structured context (offending services, type names)
/// to diagnose a misconfigured deployment without re-running it.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// No registry-capable service was discovered.
    #[error("a service registry is required but none was discovered")]
    RegistryMissing,

    /// More than one registry-capable service was discovered.
    #[error(
        "exactly one service registry is allowed, found {}: {}",
        registries.len(),
        registry_names(registries)
    )]
    RegistryAmbiguous {
        /// Every discovered registry, in discovery order.
        registries: Vec<RegistryRef>,
    },

    /// The registry could not resolve itself after basic services were registered.
    #[error("service registry {registry_type} did not resolve itself after registration")]
    RegistryUnsatisfied {
        /// Concrete type name of the registry discovered before registration.
        registry_type: String,
    },

    /// A service the bootstrap depends on is not available from the registry.
    #[error("required service {service_type} was not found in the registry")]
    ServiceNotFound {
        /// Type name of the missing service.
        service_type: &'static str,
    },

    /// A basic service failed to activate.
    #[error(transparent)]
    Activation(#[from] ActivationError),

    /// A handler rejected the startup broadcast.
    #[error("startup broadcast aborted: {0}")]
    StartupFault(#[source] HandlerFault),
}

fn registry_names(registries: &[RegistryRef]) -> String {
    let names: Vec<&str> = registries.iter().map(|r| r.name()).collect();
    names.join(", ")
}

impl BootstrapError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use bootvisor::BootstrapError;
    ///
    /// let err = BootstrapError::RegistryMissing;
    /// assert_eq!(err.as_label(), "registry_missing");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BootstrapError::RegistryMissing => "registry_missing",
            BootstrapError::RegistryAmbiguous { .. } => "registry_ambiguous",
            BootstrapError::RegistryUnsatisfied { .. } => "registry_unsatisfied",
            BootstrapError::ServiceNotFound { .. } => "service_not_found",
            BootstrapError::Activation(_) => "activation_failure",
            BootstrapError::StartupFault(_) => "startup_fault",
        }
    }
}

/// # Failure to activate a registered service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("activation of {service} failed: {reason}")]
pub struct ActivationError {
    /// Name of the service that failed.
    pub service: String,
    /// Human-readable failure message.
    pub reason: String,
}

impl ActivationError {
    /// Creates an activation error for `service`.
    pub fn new(service: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        "activation_failure"
    }
}

/// # Fault raised while a handler processed an event.
///
/// Produced either by the handler itself (returned `Err`) or by the bus when
/// the handler panicked.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerFault {
    /// Handler returned an error.
    #[error("handler {handler} failed on topic {topic}: {reason}")]
    Failed {
        handler: String,
        topic: String,
        reason: String,
    },

    /// Handler panicked; the panic payload is rendered into `info`.
    #[error("handler {handler} panicked on topic {topic}: {info}")]
    Panicked {
        handler: String,
        topic: String,
        info: String,
    },
}

impl HandlerFault {
    /// Convenience constructor for handler implementations.
    ///
    /// `handler` and `topic` are filled in by the bus when it records the fault,
    /// so handlers only need to describe what went wrong.
    pub fn failed(reason: impl Into<String>) -> Self {
        HandlerFault::Failed {
            handler: String::new(),
            topic: String::new(),
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerFault::Failed { .. } => "handler_failed",
            HandlerFault::Panicked { .. } => "handler_panicked",
        }
    }

    /// Returns the same fault attributed to `handler` on `topic`.
    pub(crate) fn attributed(self, handler: &str, topic: &str) -> Self {
        match self {
            HandlerFault::Failed { reason, .. } => HandlerFault::Failed {
                handler: handler.to_string(),
                topic: topic.to_string(),
                reason,
            },
            HandlerFault::Panicked { info, .. } => HandlerFault::Panicked {
                handler: handler.to_string(),
                topic: topic.to_string(),
                info,
            },
        }
    }
}

/// # Command line problems.
///
/// These never abort the bootstrap: invalid options are logged and skipped.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliOptionError {
    /// Argument does not start with the configured option prefix.
    #[error("the command line option is invalid - {option}")]
    InvalidOption {
        /// The offending raw argument.
        option: String,
    },

    /// An empty option prefix was supplied.
    #[error("the option prefix must not be empty")]
    EmptyPrefix,
}

impl CliOptionError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            CliOptionError::InvalidOption { .. } => "invalid_cli_option",
            CliOptionError::EmptyPrefix => "empty_option_prefix",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::LocalRegistry;

    #[test]
    fn test_ambiguous_message_lists_registries() {
        let first: RegistryRef = LocalRegistry::new();
        let second: RegistryRef = LocalRegistry::new();
        let err = BootstrapError::RegistryAmbiguous {
            registries: vec![first, second],
        };
        let msg = err.to_string();
        assert!(msg.contains("found 2"));
        assert_eq!(msg.matches("LocalRegistry").count(), 2);
        assert!(format!("{err:?}").contains("Registry(\"bootvisor::registry::local::LocalRegistry\")"));
        assert_eq!(err.as_label(), "registry_ambiguous");
    }

    #[test]
    fn test_activation_converts_into_bootstrap_error() {
        let err: BootstrapError = ActivationError::new("log", "disk full").into();
        assert_eq!(err.as_label(), "activation_failure");
        assert_eq!(err.to_string(), "activation of log failed: disk full");
    }

    #[test]
    fn test_fault_attribution_keeps_reason() {
        let fault = HandlerFault::failed("boom").attributed("audit", "SystemShuttingDown");
        assert_eq!(
            fault,
            HandlerFault::Failed {
                handler: "audit".into(),
                topic: "SystemShuttingDown".into(),
                reason: "boom".into(),
            }
        );
    }
}
