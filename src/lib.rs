//! # bootvisor
//!
//! **Bootvisor** is a small bootstrap coordinator for service-based applications.
//!
//! It discovers services, resolves the single service registry, applies the command
//! line, activates the basic services in a fixed order, announces startup, blocks
//! until termination is requested and finally announces shutdown.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Service    │   │   Service    │   │   Service    │
//!     │  (registry)  │   │ (tag: log)   │   │ (app: http)  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            └──────────────────┼──────────────────┘
//!                               ▼
//!                     ┌───────────────────┐
//!                     │   ServiceLoader   │  discovery (unordered)
//!                     └─────────┬─────────┘
//!                               ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Bootstrap (lifecycle orchestrator)                               │
//! │  - Classification (registries / basic / other)                    │
//! │  - Registry (register basics, find by capability, activate)       │
//! │  - CliConfigProvider (options ─► ConfigTracer, "system." keys)    │
//! │  - TerminationGate (signal or exit request, first wins)           │
//! └──────┬──────────────────────────────────────────────────┬─────────┘
//!        │ SystemStartingUp (strict)                        │ SystemShuttingDown
//!        ▼                                                  ▼ (best effort)
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                 EventBus (handlers in registration order)         │
//! └───────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ ExitSystemRequest (any task)
//! ```
//!
//! ### Lifecycle
//! ```text
//! Discover ─► Classify ─► Resolve ─► Configure ─► Activate ─► Startup ─► Run ─► Shutdown ─► Terminate
//!                            │           │            │          │
//!                            └───────────┴────────────┴──────────┴──► BootstrapError (fatal)
//! ```
//!
//! ## Features
//! | Area              | Description                                                     | Key types / traits                          |
//! |-------------------|-----------------------------------------------------------------|---------------------------------------------|
//! | **Lifecycle**     | Sequential bootstrap with a single termination gate.            | [`Bootstrap`], [`TerminationGate`]          |
//! | **Services**      | Discovered handles, tags and typed capabilities.                | [`Service`], [`ServiceHandle`], [`Tag`]     |
//! | **Registry**      | Single authoritative registry, activation by tag.               | [`Registry`], [`LocalRegistry`]             |
//! | **Command line**  | `-x`, `-x=v`, `-xyz` options forwarded as `system.*` settings.  | [`CliConfigProvider`], [`ConfigTracer`]     |
//! | **Events**        | Startup, shutdown and exit request broadcast.                   | [`EventBus`], [`EventHandler`], [`Event`]   |
//! | **Errors**        | Typed fatal and recoverable errors.                             | [`BootstrapError`], [`HandlerFault`]        |
//! | **Configuration** | Centralize bootstrap settings.                                  | [`BootstrapConfig`]                         |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] handler _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use bootvisor::{
//!     Bootstrap, BootstrapConfig, CliConfigProvider, ConfigTracer, LocalEventBus,
//!     LocalRegistry, Release,
//! };
//!
//! struct Stdout;
//!
//! impl ConfigTracer for Stdout {
//!     fn on_change(&self, key: &str, value: &str) {
//!         println!("{key} = {value}");
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = BootstrapConfig {
//!         handle_os_signals: false,
//!         ..BootstrapConfig::default()
//!     };
//!
//!     let bootstrap = Bootstrap::builder(cfg)
//!         .with_services(vec![
//!             LocalRegistry::new().handle(),
//!             CliConfigProvider::new(Arc::new(Stdout)).into_handle(),
//!             Arc::new(LocalEventBus::new()).into_handle(),
//!         ])
//!         .build();
//!
//!     // Normally released by a signal or an exit request event.
//!     bootstrap.gate().release(Release::ExitRequest);
//!
//!     let report = bootstrap.run(["-v", "-level=debug"]).await?;
//!     assert_eq!(report.release, Release::ExitRequest);
//!     assert_eq!(report.cli.forwarded, 2);
//!     Ok(())
//! }
//! ```
mod cli;
mod config;
mod core;
mod error;
mod events;
mod registry;
mod services;

// ---- Public re-exports ----

pub use cli::{
    CliConfigProvider, ConfigTracer, ConfigTracerRef, FLAG_VALUE, OptionPair, OptionSyntax,
    ParseSummary, QUALIFY_SYSTEM, qualify_system, tokenize,
};
pub use config::{BootstrapConfig, DEFAULT_OPTION_PREFIX, DEFAULT_OPTION_SEPARATOR};
pub use crate::core::{
    Bootstrap, BootstrapBuilder, ExitRequestHandler, Release, ShutdownReport, TerminationGate,
    wait_for_shutdown_signal,
};
pub use error::{ActivationError, BootstrapError, CliOptionError, HandlerFault};
pub use events::{
    Attributes, Delivered, Delivery, Event, EventBus, EventBusRef, EventHandler, EventKind,
    HandlerRef, LocalEventBus,
};
pub use registry::{LocalRegistry, Registry, RegistryRef, activate_basics, resolve_registry};
pub use services::{
    BASIC_TAGS, Capability, CapabilityKind, Classification, Service, ServiceHandle, ServiceLoader,
    ServiceRef, StaticLoader, Tag,
};

// Optional: expose a simple built-in logging handler (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use events::LogWriter;
