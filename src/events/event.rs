//! # Lifecycle events broadcast by the bootstrap.
//!
//! The [`EventKind`] enum classifies the events of the application lifecycle:
//! - **Startup**: `SystemStartingUp`, fired once all basic services are active
//! - **Shutdown**: `SystemShuttingDown`, fired after the run phase ends
//! - **Control**: `ExitSystemRequest`, fired by the application to end the run phase
//!
//! The [`Event`] struct is immutable once built and carries the named attributes
//! of its kind (start time, handed-off services, shutdown cause) plus a free-form
//! attribute map used for handler filtering.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use std::time::SystemTime;
//! use bootvisor::{Event, EventKind};
//!
//! let ev = Event::starting_up(SystemTime::now(), Vec::new())
//!     .with_attribute("profile", "dev");
//!
//! assert_eq!(ev.kind, EventKind::SystemStartingUp);
//! assert_eq!(ev.topic(), "SystemStartingUp");
//! assert_eq!(ev.attribute("profile"), Some("dev"));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::services::ServiceHandle;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Named attributes of an event or a handler filter.
pub type Attributes = BTreeMap<String, String>;

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// All basic services are active; the application may start.
    ///
    /// Sets:
    /// - `start_time`: process start timestamp captured before discovery
    /// - `services`: non-basic services handed to the application
    SystemStartingUp,

    /// The run phase ended; the application must stop.
    ///
    /// Sets:
    /// - `services`: non-basic services handed to the application
    /// - `cause`: interruption cause, if the wait was interrupted
    SystemShuttingDown,

    /// Request to end the run phase (in-process alternative to an OS signal).
    ExitSystemRequest,
}

impl EventKind {
    /// Topic string handlers subscribe to.
    pub const fn topic(self) -> &'static str {
        match self {
            EventKind::SystemStartingUp => "SystemStartingUp",
            EventKind::SystemShuttingDown => "SystemShuttingDown",
            EventKind::ExitSystemRequest => "ExitSystemRequest",
        }
    }
}

/// Immutable lifecycle event.
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp of creation.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Process start time (startup only).
    pub start_time: Option<SystemTime>,
    /// Services handed to the application.
    pub services: Arc<[ServiceHandle]>,
    /// Why the run phase ended early, if it was interrupted.
    pub cause: Option<Arc<str>>,
    /// Free-form attributes, matched against handler filters.
    pub attributes: Attributes,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            start_time: None,
            services: Arc::from(Vec::new()),
            cause: None,
            attributes: Attributes::new(),
        }
    }

    /// Startup event carrying the process start time and the services to hand off.
    pub fn starting_up(start_time: SystemTime, services: Vec<ServiceHandle>) -> Self {
        Event::new(EventKind::SystemStartingUp)
            .with_start_time(start_time)
            .with_services(services)
    }

    /// Shutdown event carrying the handed-off services and an optional cause.
    pub fn shutting_down(services: Vec<ServiceHandle>, cause: Option<&str>) -> Self {
        let ev = Event::new(EventKind::SystemShuttingDown).with_services(services);
        match cause {
            Some(cause) => ev.with_cause(cause),
            None => ev,
        }
    }

    /// Request to end the run phase.
    pub fn exit_request() -> Self {
        Event::new(EventKind::ExitSystemRequest)
    }

    /// Topic of this event.
    #[inline]
    pub fn topic(&self) -> &'static str {
        self.kind.topic()
    }

    #[inline]
    pub fn with_start_time(mut self, at: SystemTime) -> Self {
        self.start_time = Some(at);
        self
    }

    #[inline]
    pub fn with_services(mut self, services: Vec<ServiceHandle>) -> Self {
        self.services = Arc::from(services);
        self
    }

    #[inline]
    pub fn with_cause(mut self, cause: impl Into<Arc<str>>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    #[inline]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Returns an attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// True if every pair of `filter` is present in this event's attributes.
    pub fn matches(&self, filter: &Attributes) -> bool {
        filter
            .iter()
            .all(|(k, v)| self.attributes.get(k).is_some_and(|have| have == v))
    }
}
