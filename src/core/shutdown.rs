//! # Cross-platform OS signal handling.
//!
//! Provides [`wait_for_shutdown_signal`] an async helper that completes when the process
//! receives a termination signal, and [`spawn_signal_observer`] which turns that
//! signal into a [`TerminationGate`] release.
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//! - `SIGQUIT` (quit signal, often used for core dumps or hard stop)
//!
//! **Windows platforms:**
//! - `Ctrl-C` via [`tokio::signal::ctrl_c`]

use tokio::task::JoinHandle;
use tracing::{error, info};

use super::gate::{Release, TerminationGate};

/// Waits for a termination signal.
///
/// Each call creates independent signal listeners.
///
/// Returns `Ok(())` when any signal is received, or `Err` if signal registration fails.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = sigint.recv()  => {},
        _ = sigterm.recv() => {},
        _ = sigquit.recv() => {},
    }
    Ok(())
}

/// Waits for a termination signal.
///
/// Each call creates independent signal listeners.
///
/// Returns `Ok(())` when any signal is received, or `Err` if signal registration fails.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

/// Spawns a task that releases `gate` on the first termination signal.
///
/// If the listeners cannot be installed the gate is released as
/// [`Release::Interrupted`] so the run phase still reaches shutdown.
/// The task ends by itself once the gate is released by another trigger.
pub fn spawn_signal_observer(gate: TerminationGate) -> JoinHandle<()> {
    tokio::spawn(async move {
        let released = gate.clone();
        tokio::select! {
            res = wait_for_shutdown_signal() => match res {
                Ok(()) => {
                    info!("termination signal received");
                    gate.release(Release::Signal);
                }
                Err(e) => {
                    error!(error = %e, "failed to install signal listeners");
                    gate.release(Release::Interrupted(e.to_string().into()));
                }
            },
            _ = released.acquire() => {}
        }
    })
}
