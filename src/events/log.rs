//! # LogWriter - lifecycle event logger
//!
//! A minimal handler that reports lifecycle events through `tracing`.
//! Register one per topic, or all of them with [`LogWriter::all`].
//!
//! ## Example output
//! ```text
//! INFO system starting up seq=3 services=2 startup_ms=41
//! INFO exit requested seq=4
//! INFO system shutting down seq=5 services=2
//! WARN system shutting down after interruption seq=5 cause="signal listener failed"
//! ```

use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::HandlerFault;

use super::event::{Event, EventKind};
use super::handler::{EventHandler, HandlerRef};

/// Lifecycle event writer.
pub struct LogWriter {
    kind: EventKind,
}

impl LogWriter {
    /// Construct a writer for one event kind.
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self { kind }
    }

    /// Writers for every lifecycle event kind.
    #[must_use]
    pub fn all() -> Vec<HandlerRef> {
        [
            EventKind::SystemStartingUp,
            EventKind::ExitSystemRequest,
            EventKind::SystemShuttingDown,
        ]
        .into_iter()
        .map(|kind| Arc::new(LogWriter::new(kind)) as HandlerRef)
        .collect()
    }
}

#[async_trait]
impl EventHandler for LogWriter {
    fn topic(&self) -> &str {
        self.kind.topic()
    }

    async fn handle(&self, e: &Event) -> Result<(), HandlerFault> {
        match e.kind {
            EventKind::SystemStartingUp => {
                let startup_ms = e
                    .start_time
                    .and_then(|t| SystemTime::now().duration_since(t).ok())
                    .map(|d| d.as_millis());
                info!(seq = e.seq, services = e.services.len(), ?startup_ms, "system starting up");
            }
            EventKind::ExitSystemRequest => {
                info!(seq = e.seq, "exit requested");
            }
            EventKind::SystemShuttingDown => match e.cause.as_deref() {
                Some(cause) => {
                    warn!(seq = e.seq, cause, "system shutting down after interruption");
                }
                None => {
                    info!(seq = e.seq, services = e.services.len(), "system shutting down");
                }
            },
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Delivery, EventBus, LocalEventBus};

    #[tokio::test]
    async fn test_writers_cover_every_topic() {
        let bus = LocalEventBus::new();
        for writer in LogWriter::all() {
            bus.register(writer);
        }
        assert_eq!(bus.len(), 3);

        let delivered = bus
            .fire(
                Event::shutting_down(Vec::new(), Some("interrupted")),
                Delivery::Strict,
            )
            .await
            .unwrap();
        assert_eq!(delivered.handled, 1);
    }
}
