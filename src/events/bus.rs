//! # Lifecycle event bus.
//!
//! [`EventBus`] is the pub/sub boundary the bootstrap talks to; [`LocalEventBus`]
//! is the in-process implementation.
//!
//! ## Architecture
//! ```text
//! fire(event, delivery)
//!     │
//!     ├─ snapshot handlers for event.topic() (registration order, attribute filter)
//!     │
//!     ├──► handler 1.handle(&event) ── Ok ─────────► next
//!     ├──► handler 2.handle(&event) ── Err/panic ──► Strict: return Err(fault)
//!     │                                              BestEffort: record, next
//!     └──► handler N.handle(&event)
//! ```
//!
//! ## Rules
//! - **Synchronous for the caller**: `fire` completes after every handler ran.
//! - **Registration order**: handlers of a topic run in the order they were registered.
//! - **Re-entrant**: the handler list is snapshotted, so a handler may register
//!   handlers or fire further events without deadlocking.
//! - **Panic isolation**: panics are caught with `catch_unwind` and become
//!   [`HandlerFault::Panicked`].
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a handler uses `Arc<Mutex<T>>` and panics while holding the lock.

use std::any::Any;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use futures::FutureExt;
use tracing::{debug, warn};

use crate::error::HandlerFault;
use crate::services::{Capability, Service, ServiceHandle, Tag};

use super::event::Event;
use super::handler::{Delivered, Delivery, HandlerRef};

/// Shared reference to a bus (`Arc<dyn EventBus>`).
pub type EventBusRef = Arc<dyn EventBus>;

/// Pub/sub boundary for lifecycle events.
#[async_trait]
pub trait EventBus: Send + Sync + 'static {
    /// Registers a handler for its topic.
    fn register(&self, handler: HandlerRef);

    /// Delivers `event` to every matching handler.
    ///
    /// Returns `Err` only in [`Delivery::Strict`] mode, with the first fault.
    async fn fire(&self, event: Event, delivery: Delivery) -> Result<Delivered, HandlerFault>;
}

/// In-process event bus.
#[derive(Default)]
pub struct LocalEventBus {
    handlers: RwLock<Vec<HandlerRef>>,
}

impl LocalEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` (builder style).
    pub fn with_handler(self, handler: HandlerRef) -> Self {
        self.register(handler);
        self
    }

    /// Wraps the bus into an `event`-tagged handle for discovery.
    pub fn into_handle(self: Arc<Self>) -> ServiceHandle {
        ServiceHandle::tagged(self, [Tag::EVENT])
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handlers for `event`, in registration order.
    fn snapshot(&self, event: &Event) -> Vec<HandlerRef> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|h| h.topic() == event.topic())
            .filter(|h| h.attributes().is_none_or(|filter| event.matches(filter)))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EventBus for LocalEventBus {
    fn register(&self, handler: HandlerRef) {
        debug!(handler = handler.name(), topic = handler.topic(), "handler registered");
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handler);
    }

    async fn fire(&self, event: Event, delivery: Delivery) -> Result<Delivered, HandlerFault> {
        let topic = event.topic();
        let handlers = self.snapshot(&event);
        debug!(topic, seq = event.seq, handlers = handlers.len(), "firing event");

        let mut delivered = Delivered::default();
        for handler in handlers {
            let fut = handler.handle(&event);
            let fault = match std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(())) => {
                    delivered.handled += 1;
                    continue;
                }
                Ok(Err(fault)) => fault.attributed(handler.name(), topic),
                Err(panic_err) => HandlerFault::Panicked {
                    handler: handler.name().to_string(),
                    topic: topic.to_string(),
                    info: panic_info(&*panic_err),
                },
            };

            match delivery {
                Delivery::Strict => return Err(fault),
                Delivery::BestEffort => {
                    warn!(label = fault.as_label(), "{fault}");
                    delivered.faults.push(fault);
                }
            }
        }
        Ok(delivered)
    }
}

impl Service for LocalEventBus {
    fn name(&self) -> &str {
        "LocalEventBus"
    }

    fn capabilities(self: Arc<Self>) -> Vec<Capability> {
        vec![Capability::EventBus(self)]
    }
}

fn panic_info(any: &(dyn Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
