//! # Example: terminal
//!
//! A complete bootstrap run in a terminal: discovery, command line, activation,
//! startup, run phase and shutdown.
//!
//! Demonstrates how to:
//! - Discover a [`LocalRegistry`], a [`CliConfigProvider`] and a [`LocalEventBus`].
//! - Activate basic services in vocabulary order.
//! - React to `SystemStartingUp` and end the run phase with an exit request.
//! - Stop early with Ctrl-C (the signal wins over the exit request).
//!
//! ## Flow
//! ```text
//! Bootstrap::run(args)
//!     ├─► classify ─► registry.register(basic)
//!     ├─► cli.parse(args) ─► PrintTracer ("system.*")
//!     ├─► activate: log ─► profile
//!     ├─► fire(SystemStartingUp) ─► LogWriter, DelayedExit (spawns timer)
//!     ├─► gate.acquire()          ◄── ExitSystemRequest after 2s, or Ctrl-C
//!     └─► fire(SystemShuttingDown) ─► LogWriter
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example terminal --features logging -- -v -level=debug
//! ```

use std::process::ExitCode;
use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use bootvisor::{
    ActivationError, Bootstrap, BootstrapConfig, CliConfigProvider, ConfigTracer, Delivery, Event,
    EventBus, EventHandler, EventKind, HandlerFault, LocalEventBus, LocalRegistry, LogWriter,
    Service, ServiceHandle, Tag,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Prints every configuration change.
struct PrintTracer;

impl ConfigTracer for PrintTracer {
    fn on_change(&self, key: &str, value: &str) {
        println!("[config] {key} = {value}");
    }
}

/// Basic service with a visible activation.
struct Announce(&'static str);

impl Service for Announce {
    fn name(&self) -> &str {
        self.0
    }

    fn activate(&self) -> Result<(), ActivationError> {
        println!("[{}] activated", self.0);
        Ok(())
    }
}

/// Application service; only ever seen through the startup event.
struct Greeter;

impl Service for Greeter {
    fn name(&self) -> &str {
        "greeter"
    }
}

/// Requests exit a while after startup.
struct DelayedExit {
    bus: Weak<LocalEventBus>,
    after: Duration,
}

#[async_trait]
impl EventHandler for DelayedExit {
    fn topic(&self) -> &str {
        EventKind::SystemStartingUp.topic()
    }

    async fn handle(&self, ev: &Event) -> Result<(), HandlerFault> {
        for svc in ev.services.iter() {
            println!("[app] handed off: {}", svc.name());
        }

        let bus = self.bus.clone();
        let after = self.after;
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let Some(bus) = bus.upgrade() else {
                return;
            };
            if let Err(fault) = bus.fire(Event::exit_request(), Delivery::Strict).await {
                warn!(label = fault.as_label(), "exit request rejected: {fault}");
            }
        });
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Event bus with the built-in writers and the demo's exit timer
    let bus = Arc::new(LocalEventBus::new());
    for writer in LogWriter::all() {
        bus.register(writer);
    }
    bus.register(Arc::new(DelayedExit {
        bus: Arc::downgrade(&bus),
        after: Duration::from_secs(2),
    }));

    // 2. Everything discovery would find, in no particular order
    let services = vec![
        ServiceHandle::tagged(Arc::new(Greeter), ["app"]),
        ServiceHandle::tagged(Arc::new(Announce("profiles")), [Tag::PROFILE]),
        LocalRegistry::new().handle(),
        CliConfigProvider::new(Arc::new(PrintTracer)).into_handle(),
        Arc::clone(&bus).into_handle(),
        ServiceHandle::tagged(Arc::new(Announce("logger")), [Tag::LOG]),
    ];

    // 3. Run the lifecycle
    let bootstrap = Bootstrap::builder(BootstrapConfig::default())
        .with_services(services)
        .build();

    match bootstrap.run(std::env::args().skip(1)).await {
        Ok(report) => {
            println!(
                "[main] terminated by {} ({} shutdown handlers, {} faults)",
                report.release,
                report.delivered.handled,
                report.delivered.faults.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("[main] bootstrap failed ({}): {e}", e.as_label());
            ExitCode::FAILURE
        }
    }
}
