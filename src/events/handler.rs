//! # Lifecycle event handlers.
//!
//! [`EventHandler`] is the extension point for reacting to lifecycle events.
//! A handler subscribes to one topic and may narrow it further with an attribute
//! filter: it then only sees events whose attributes contain every declared pair.
//!
//! ## Contract
//! - Handlers run on the task that fired the event, in registration order.
//! - Returning `Err` (or panicking) is a fault. Whether a fault stops delivery is
//!   decided by the firing side through [`Delivery`].
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use bootvisor::{Event, EventHandler, EventKind, HandlerFault};
//!
//! struct Greeter;
//!
//! #[async_trait]
//! impl EventHandler for Greeter {
//!     fn topic(&self) -> &str {
//!         EventKind::SystemStartingUp.topic()
//!     }
//!
//!     async fn handle(&self, ev: &Event) -> Result<(), HandlerFault> {
//!         println!("{} services handed off", ev.services.len());
//!         Ok(())
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HandlerFault;

use super::event::{Attributes, Event};

/// Shared reference to a handler (`Arc<dyn EventHandler>`).
pub type HandlerRef = Arc<dyn EventHandler>;

/// Contract for lifecycle event handlers.
#[async_trait]
pub trait EventHandler: Send + Sync + 'static {
    /// Topic this handler subscribes to.
    fn topic(&self) -> &str;

    /// Handles one event.
    async fn handle(&self, event: &Event) -> Result<(), HandlerFault>;

    /// Human-readable name (for logs and faults).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Attribute filter; `None` accepts every event of the topic.
    fn attributes(&self) -> Option<&Attributes> {
        None
    }
}

/// How a bus reacts to handler faults during one `fire`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delivery {
    /// Stop at the first fault and return it.
    #[default]
    Strict,
    /// Record the fault and keep delivering to the remaining handlers.
    BestEffort,
}

/// Result of a completed delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivered {
    /// Handlers that completed without a fault.
    pub handled: usize,
    /// Faults recovered in [`Delivery::BestEffort`] mode.
    pub faults: Vec<HandlerFault>,
}

impl Delivered {
    /// True if every handler completed without a fault.
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}
