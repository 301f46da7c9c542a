//! # In-process exit request.
//!
//! [`ExitRequestHandler`] is registered by the bootstrap right before the startup
//! broadcast. Any task can end the run phase by firing
//! [`Event::exit_request`](crate::Event::exit_request) on the bus.

use async_trait::async_trait;
use tracing::debug;

use crate::error::HandlerFault;
use crate::events::{Event, EventHandler, EventKind};

use super::gate::{Release, TerminationGate};

/// Releases the termination gate on `ExitSystemRequest`.
pub struct ExitRequestHandler {
    gate: TerminationGate,
}

impl ExitRequestHandler {
    pub fn new(gate: TerminationGate) -> Self {
        Self { gate }
    }
}

#[async_trait]
impl EventHandler for ExitRequestHandler {
    fn topic(&self) -> &str {
        EventKind::ExitSystemRequest.topic()
    }

    async fn handle(&self, event: &Event) -> Result<(), HandlerFault> {
        let effective = self.gate.release(Release::ExitRequest);
        debug!(seq = event.seq, effective, "exit request received");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ExitRequestHandler"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::events::{Delivery, EventBus, LocalEventBus};

    #[tokio::test]
    async fn test_repeated_requests_release_once() {
        let gate = TerminationGate::new();
        let bus = LocalEventBus::new().with_handler(Arc::new(ExitRequestHandler::new(gate.clone())));

        for _ in 0..2 {
            let delivered = bus
                .fire(Event::exit_request(), Delivery::Strict)
                .await
                .unwrap();
            assert_eq!(delivered.handled, 1);
        }
        assert_eq!(gate.try_acquire(), Some(Release::ExitRequest));
    }

    #[tokio::test]
    async fn test_request_after_signal_keeps_signal_cause() {
        let gate = TerminationGate::new();
        gate.release(Release::Signal);

        let handler = ExitRequestHandler::new(gate.clone());
        handler.handle(&Event::exit_request()).await.unwrap();

        assert_eq!(gate.acquire().await, Release::Signal);
    }
}
