//! Runtime core: orchestration and lifecycle.
//!
//! The public API of this module is [`Bootstrap`] (with its builder and report) and
//! the [`TerminationGate`] that ends the run phase.
//!
//! Internal modules:
//! - [`bootstrap`]: the sequential lifecycle state machine;
//! - [`gate`]: one-shot termination gate;
//! - [`exit`]: exit request handler releasing the gate;
//! - [`shutdown`]: cross-platform OS signal handling.

mod bootstrap;
mod builder;
mod exit;
mod gate;
mod shutdown;

pub use bootstrap::{Bootstrap, ShutdownReport};
pub use builder::BootstrapBuilder;
pub use exit::ExitRequestHandler;
pub use gate::{Release, TerminationGate};
pub use shutdown::wait_for_shutdown_signal;
