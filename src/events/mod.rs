//! Lifecycle events: types, handlers and the event bus.
//!
//! This module groups the event **data model**, the **handler** contract and the
//! **bus** used to broadcast lifecycle events.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and attributes
//! - [`EventHandler`], [`Delivery`], [`Delivered`] handler contract and delivery modes
//! - [`EventBus`], [`LocalEventBus`] bus boundary and in-process implementation
//!
//! ## Quick reference
//! - **Publishers**: the bootstrap (startup, shutdown) and the application (exit request).
//! - **Consumers**: application handlers and the bootstrap's own exit-request handler.

mod bus;
mod event;
mod handler;
#[cfg(feature = "logging")]
mod log;

pub use bus::{EventBus, EventBusRef, LocalEventBus};
pub use event::{Attributes, Event, EventKind};
pub use handler::{Delivered, Delivery, EventHandler, HandlerRef};
#[cfg(feature = "logging")]
pub use log::LogWriter;
