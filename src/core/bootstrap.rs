//! # Bootstrap: discovers services, wires the registry and drives the lifecycle.
//!
//! The [`Bootstrap`] owns the service loader, the configuration and the
//! [`TerminationGate`]. [`Bootstrap::run`] walks a strictly sequential state machine;
//! no state is ever revisited.
//!
//! ## Sequence
//! ```text
//! run(args):
//!   1. Discover     loader.load_services()
//!   2. Classify     Classification::classify(services, basic_tags)
//!   3. Resolve      resolve_registry()                  ─► RegistryMissing / Ambiguous / Unsatisfied
//!   4. Configure    registry.find_cli_provider()        ─► ServiceNotFound
//!                   registry.find_event_bus()           ─► ServiceNotFound
//!                   cli.parse_with(args, cfg syntax)    (invalid options: warn + skip)
//!   5. Activate     activate_basics(registry, basic_tags) ─► Activation
//!   6. Startup      bus.register(ExitRequestHandler)
//!                   bus.fire(SystemStartingUp, Strict)  ─► StartupFault
//!   7. Run          spawn_signal_observer(gate)         (if enabled)
//!                   gate.acquire().await                (unbounded)
//!   8. Shutdown     bus.fire(SystemShuttingDown, BestEffort)
//!   9. Terminate    return ShutdownReport
//! ```
//!
//! Every error is raised at steps 3 to 6, before the run phase: nothing is armed
//! concurrently until the startup broadcast, and a fatal error leaves no lifecycle
//! event fired except for a rejected startup broadcast itself.

use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, info, warn};

use crate::cli::{OptionSyntax, ParseSummary};
use crate::config::BootstrapConfig;
use crate::error::BootstrapError;
use crate::events::{Delivered, Delivery, Event, EventBusRef};
use crate::registry::{activate_basics, resolve_registry};
use crate::services::{CapabilityKind, Classification, ServiceHandle, ServiceLoader};

use super::{
    builder::BootstrapBuilder,
    exit::ExitRequestHandler,
    gate::{Release, TerminationGate},
    shutdown,
};

/// Outcome of a completed lifecycle.
#[derive(Debug, Clone)]
pub struct ShutdownReport {
    /// Process start time captured before discovery.
    pub started_at: SystemTime,
    /// What ended the run phase.
    pub release: Release,
    /// Command line outcome.
    pub cli: ParseSummary,
    /// Shutdown broadcast outcome (faults are recovered, not fatal).
    pub delivered: Delivered,
}

/// State handed from the startup steps to the run and shutdown steps.
struct Started {
    bus: EventBusRef,
    other: Vec<ServiceHandle>,
    cli: ParseSummary,
}

/// Application bootstrap context.
pub struct Bootstrap {
    cfg: BootstrapConfig,
    loader: Arc<dyn ServiceLoader>,
    gate: TerminationGate,
}

impl Bootstrap {
    /// Creates a builder with the given configuration.
    pub fn builder(cfg: BootstrapConfig) -> BootstrapBuilder {
        BootstrapBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: BootstrapConfig,
        loader: Arc<dyn ServiceLoader>,
        gate: TerminationGate,
    ) -> Self {
        Self { cfg, loader, gate }
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.cfg
    }

    /// The gate ending the run phase; releasing it has the same effect as a signal.
    pub fn gate(&self) -> &TerminationGate {
        &self.gate
    }

    /// Runs the whole lifecycle with the given process arguments (program name excluded).
    ///
    /// Returns after the shutdown broadcast, or with the first fatal error.
    pub async fn run<I, S>(&self, args: I) -> Result<ShutdownReport, BootstrapError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let started_at = SystemTime::now();
        let started = self.start(args, started_at).await?;
        let release = self.wait().await;
        let delivered = self.stop(&started.bus, started.other, &release).await;

        info!(release = release.as_label(), "bootstrap terminated");
        Ok(ShutdownReport {
            started_at,
            release,
            cli: started.cli,
            delivered,
        })
    }

    /// Steps 1 to 6: discover, classify, resolve, configure, activate, announce startup.
    async fn start<I, S>(&self, args: I, started_at: SystemTime) -> Result<Started, BootstrapError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let discovered = self.loader.load_services();
        info!(services = discovered.len(), "services discovered");

        let classes = Classification::classify(discovered, self.cfg.basic_tags());
        debug!(
            registries = classes.registries.len(),
            basic = classes.basic.len(),
            other = classes.other.len(),
            "services classified"
        );

        let registry = resolve_registry(&classes)?;

        let cli = registry
            .find_cli_provider()
            .ok_or(BootstrapError::ServiceNotFound {
                service_type: CapabilityKind::CliConfig.type_name(),
            })?;
        let bus = registry
            .find_event_bus()
            .ok_or(BootstrapError::ServiceNotFound {
                service_type: CapabilityKind::EventBus.type_name(),
            })?;

        let parsed = cli.parse_with(args, &OptionSyntax::from_config(&self.cfg));
        info!(
            forwarded = parsed.forwarded,
            rejected = parsed.rejected.len(),
            "command line applied"
        );

        activate_basics(&*registry, self.cfg.basic_tags())?;
        info!(basic = classes.basic.len(), "basic services activated");

        bus.register(Arc::new(ExitRequestHandler::new(self.gate.clone())));
        let other = classes.other;
        bus.fire(Event::starting_up(started_at, other.clone()), Delivery::Strict)
            .await
            .map_err(BootstrapError::StartupFault)?;
        info!(services = other.len(), "system started");

        Ok(Started {
            bus,
            other,
            cli: parsed,
        })
    }

    /// Step 7: block until the gate is released.
    async fn wait(&self) -> Release {
        let observer = self
            .cfg
            .handle_os_signals
            .then(|| shutdown::spawn_signal_observer(self.gate.clone()));

        let release = self.gate.acquire().await;
        if let Some(observer) = observer {
            observer.abort();
        }
        info!(release = %release, "termination requested");
        release
    }

    /// Step 8: best-effort shutdown broadcast.
    async fn stop(&self, bus: &EventBusRef, other: Vec<ServiceHandle>, release: &Release) -> Delivered {
        let event = Event::shutting_down(other, release.cause());
        match bus.fire(event, Delivery::BestEffort).await {
            Ok(delivered) => {
                if !delivered.is_clean() {
                    warn!(
                        faults = delivered.faults.len(),
                        handled = delivered.handled,
                        "shutdown broadcast completed with faults"
                    );
                }
                delivered
            }
            Err(fault) => {
                warn!(label = fault.as_label(), "shutdown broadcast rejected: {fault}");
                Delivered {
                    handled: 0,
                    faults: vec![fault],
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, Weak};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::cli::{CliConfigProvider, ConfigTracer};
    use crate::error::{ActivationError, CliOptionError, HandlerFault};
    use crate::events::{EventBus, EventHandler, EventKind, LocalEventBus};
    use crate::registry::{LocalRegistry, RegistryRef};
    use crate::services::{Service, Tag};

    type Log = Arc<Mutex<Vec<String>>>;

    #[derive(Default)]
    struct Tracer {
        changes: Mutex<Vec<(String, String)>>,
    }

    impl ConfigTracer for Tracer {
        fn on_change(&self, key: &str, value: &str) {
            self.changes
                .lock()
                .unwrap()
                .push((key.to_string(), value.to_string()));
        }
    }

    /// Basic or application service recording its activation.
    struct Component {
        name: &'static str,
        fail: bool,
        log: Log,
    }

    impl Service for Component {
        fn name(&self) -> &str {
            self.name
        }

        fn activate(&self) -> Result<(), ActivationError> {
            self.log.lock().unwrap().push(format!("activate:{}", self.name));
            if self.fail {
                return Err(ActivationError::new(self.name, "refused"));
            }
            Ok(())
        }
    }

    /// Records every event of its topic.
    struct Recorder {
        topic: EventKind,
        fail: bool,
        log: Log,
    }

    #[async_trait]
    impl EventHandler for Recorder {
        fn topic(&self) -> &str {
            self.topic.topic()
        }

        async fn handle(&self, ev: &Event) -> Result<(), HandlerFault> {
            let names: Vec<&str> = ev.services.iter().map(ServiceHandle::name).collect();
            let cause = ev.cause.as_deref().unwrap_or("-");
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:{}:{}", ev.topic(), names.join(","), cause));
            if self.fail {
                return Err(HandlerFault::failed("recorder refused"));
            }
            Ok(())
        }
    }

    /// Fires an exit request while the startup broadcast is still running.
    struct ExitOnStartup {
        bus: Weak<LocalEventBus>,
    }

    #[async_trait]
    impl EventHandler for ExitOnStartup {
        fn topic(&self) -> &str {
            EventKind::SystemStartingUp.topic()
        }

        async fn handle(&self, _ev: &Event) -> Result<(), HandlerFault> {
            let Some(bus) = self.bus.upgrade() else {
                return Err(HandlerFault::failed("bus dropped"));
            };
            bus.fire(Event::exit_request(), Delivery::Strict).await?;
            Ok(())
        }
    }

    struct Fixture {
        log: Log,
        tracer: Arc<Tracer>,
        bus: Arc<LocalEventBus>,
        registry: Arc<LocalRegistry>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                log: Arc::new(Mutex::new(Vec::new())),
                tracer: Arc::new(Tracer::default()),
                bus: Arc::new(LocalEventBus::new()),
                registry: LocalRegistry::new(),
            }
        }

        fn component(&self, name: &'static str, fail: bool) -> Arc<Component> {
            Arc::new(Component {
                name,
                fail,
                log: Arc::clone(&self.log),
            })
        }

        fn record(&self, topic: EventKind, fail: bool) {
            self.bus.register(Arc::new(Recorder {
                topic,
                fail,
                log: Arc::clone(&self.log),
            }));
        }

        /// Registry, CLI provider, bus, two basic services and two application services.
        fn services(&self) -> Vec<ServiceHandle> {
            vec![
                ServiceHandle::plain(self.component("worker", false)),
                self.registry.handle(),
                ServiceHandle::tagged(self.component("profiles", false), [Tag::PROFILE]),
                CliConfigProvider::new(self.tracer.clone()).into_handle(),
                ServiceHandle::tagged(self.component("web", false), ["http"]),
                Arc::clone(&self.bus).into_handle(),
                ServiceHandle::tagged(self.component("logger", false), [Tag::LOG]),
            ]
        }

        fn bootstrap(&self, services: Vec<ServiceHandle>) -> Bootstrap {
            self.bootstrap_with(BootstrapConfig::default(), services)
        }

        fn bootstrap_with(&self, cfg: BootstrapConfig, services: Vec<ServiceHandle>) -> Bootstrap {
            let cfg = BootstrapConfig {
                handle_os_signals: false,
                ..cfg
            };
            Bootstrap::builder(cfg).with_services(services).build()
        }

        fn log(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }
    }

    #[tokio::test]
    async fn test_missing_registry_fires_no_event() {
        let fx = Fixture::new();
        fx.record(EventKind::SystemStartingUp, false);
        fx.record(EventKind::SystemShuttingDown, false);

        let services: Vec<ServiceHandle> = fx
            .services()
            .into_iter()
            .filter(|h| h.as_registry().is_none())
            .collect();
        let err = fx.bootstrap(services).run(["-v"]).await.unwrap_err();

        assert!(matches!(err, BootstrapError::RegistryMissing));
        assert!(fx.log().is_empty());
        assert!(fx.tracer.changes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ambiguous_registry_lists_exactly_the_registries() {
        let fx = Fixture::new();
        fx.record(EventKind::SystemStartingUp, false);
        let extra = LocalRegistry::new();
        let mut services = fx.services();
        services.push(extra.handle());

        let err = fx
            .bootstrap(services)
            .run(Vec::<String>::new())
            .await
            .unwrap_err();

        match err {
            BootstrapError::RegistryAmbiguous { registries } => {
                let discovered: RegistryRef = fx.registry.clone();
                let extra: RegistryRef = extra;
                assert_eq!(registries.len(), 2);
                assert!(Arc::ptr_eq(&registries[0], &discovered));
                assert!(Arc::ptr_eq(&registries[1], &extra));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(fx.log().is_empty());
    }

    #[tokio::test]
    async fn test_missing_cli_provider_is_fatal() {
        let fx = Fixture::new();
        let services: Vec<ServiceHandle> = fx
            .services()
            .into_iter()
            .filter(|h| h.name() != "CliConfigProvider")
            .collect();

        let err = fx
            .bootstrap(services)
            .run(Vec::<String>::new())
            .await
            .unwrap_err();

        match err {
            BootstrapError::ServiceNotFound { service_type } => {
                assert_eq!(service_type, "bootvisor::CliConfigProvider");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Nothing was activated.
        assert!(fx.log().is_empty());
    }

    #[tokio::test]
    async fn test_missing_event_bus_is_fatal_before_activation() {
        let fx = Fixture::new();
        let services: Vec<ServiceHandle> = fx
            .services()
            .into_iter()
            .filter(|h| h.name() != "LocalEventBus")
            .collect();

        let err = fx.bootstrap(services).run(["-v"]).await.unwrap_err();

        assert_eq!(err.as_label(), "service_not_found");
        assert!(fx.log().is_empty());
    }

    #[tokio::test]
    async fn test_activation_failure_aborts_before_startup() {
        let fx = Fixture::new();
        fx.record(EventKind::SystemStartingUp, false);
        let mut services = fx.services();
        services.push(ServiceHandle::tagged(
            fx.component("config-store", true),
            [Tag::CONFIG],
        ));

        let err = fx.bootstrap(services).run(["-name=x"]).await.unwrap_err();

        match err {
            BootstrapError::Activation(e) => assert_eq!(e.service, "config-store"),
            other => panic!("unexpected error: {other}"),
        }
        // Command line was applied (step 4) before activation (step 5); no event fired.
        assert_eq!(
            *fx.tracer.changes.lock().unwrap(),
            [("system.name".to_string(), "x".to_string())]
        );
        assert_eq!(fx.log(), ["activate:config-store"]);
    }

    #[tokio::test]
    async fn test_configured_option_syntax_applies_to_discovered_provider() {
        let fx = Fixture::new();
        let cfg = BootstrapConfig {
            option_prefix: "+".to_string(),
            option_separator: ":".to_string(),
            ..BootstrapConfig::default()
        };
        let bootstrap = fx.bootstrap_with(cfg, fx.services());
        bootstrap.gate().release(Release::ExitRequest);

        let report = bootstrap.run(["+v", "+mode:fast", "-x"]).await.unwrap();

        assert_eq!(report.cli.forwarded, 2);
        assert_eq!(
            report.cli.rejected,
            [CliOptionError::InvalidOption {
                option: "-x".to_string()
            }]
        );
        assert_eq!(
            *fx.tracer.changes.lock().unwrap(),
            [
                ("system.v".to_string(), "true".to_string()),
                ("system.mode".to_string(), "fast".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_startup_fault_is_fatal() {
        let fx = Fixture::new();
        fx.record(EventKind::SystemStartingUp, true);

        let err = fx
            .bootstrap(fx.services())
            .run(Vec::<String>::new())
            .await
            .unwrap_err();

        assert_eq!(err.as_label(), "startup_fault");
    }

    #[tokio::test]
    async fn test_full_lifecycle_with_exit_request_during_startup() {
        let fx = Fixture::new();
        fx.record(EventKind::SystemStartingUp, false);
        fx.bus.register(Arc::new(ExitOnStartup {
            bus: Arc::downgrade(&fx.bus),
        }));
        fx.record(EventKind::SystemShuttingDown, true);
        fx.record(EventKind::SystemShuttingDown, false);

        let report = fx
            .bootstrap(fx.services())
            .run(["-ab", "stray", "-level=debug"])
            .await
            .unwrap();

        assert_eq!(report.release, Release::ExitRequest);
        assert_eq!(report.cli.forwarded, 3);
        assert_eq!(report.cli.rejected.len(), 1);
        assert_eq!(report.delivered.handled, 1);
        assert_eq!(report.delivered.faults.len(), 1);

        assert_eq!(
            fx.log(),
            [
                // Basic services activate in vocabulary order: log before profile.
                "activate:logger",
                "activate:profiles",
                "SystemStartingUp:worker,web:-",
                "SystemShuttingDown:worker,web:-",
                "SystemShuttingDown:worker,web:-",
            ]
        );
        assert_eq!(
            fx.registry.names(),
            ["profiles", "CliConfigProvider", "LocalEventBus", "logger"]
        );
        let keys: Vec<String> = fx
            .tracer
            .changes
            .lock()
            .unwrap()
            .iter()
            .map(|(k, _)| k.clone())
            .collect();
        assert_eq!(keys, ["system.a", "system.b", "system.level"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_exit_request_from_another_task() {
        let fx = Fixture::new();
        fx.record(EventKind::SystemShuttingDown, false);
        let bootstrap = fx.bootstrap(fx.services());

        let bus = Arc::clone(&fx.bus);
        let gate = bootstrap.gate().clone();
        let requester = tokio::spawn(async move {
            // Requests fired before startup reach no handler; keep asking.
            while !gate.is_released() {
                tokio::time::sleep(Duration::from_millis(10)).await;
                // Two racing requests still end the run phase once.
                let first = bus.fire(Event::exit_request(), Delivery::Strict);
                let second = bus.fire(Event::exit_request(), Delivery::Strict);
                let (a, b) = tokio::join!(first, second);
                a.unwrap();
                b.unwrap();
            }
        });

        let report = tokio::time::timeout(Duration::from_secs(5), bootstrap.run(["-q"]))
            .await
            .expect("run must finish after the exit request")
            .unwrap();
        requester.await.unwrap();

        assert_eq!(report.release, Release::ExitRequest);
        assert_eq!(fx.log().last().map(String::as_str), Some("SystemShuttingDown:worker,web:-"));
    }

    #[tokio::test]
    async fn test_interrupted_wait_carries_cause_into_shutdown() {
        let fx = Fixture::new();
        fx.record(EventKind::SystemShuttingDown, false);
        let bootstrap = fx.bootstrap(fx.services());
        bootstrap
            .gate()
            .release(Release::Interrupted(Arc::from("listener failed")));

        let report = bootstrap.run(Vec::<String>::new()).await.unwrap();

        assert_eq!(report.release.cause(), Some("listener failed"));
        assert_eq!(fx.log(), [
            "activate:logger",
            "activate:profiles",
            "SystemShuttingDown:worker,web:listener failed",
        ]);
    }
}
