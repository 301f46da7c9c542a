//! # Termination gate: one-shot release shared by every shutdown trigger.
//!
//! The run phase blocks on [`TerminationGate::acquire`] until a trigger calls
//! [`TerminationGate::release`]. Two independent sources race to release it:
//!
//! ```text
//! OS signal listener task ──┐
//!                           ├──► release(why) ──► first wins, cause recorded
//! ExitSystemRequest handler ┘                     later attempts are no-ops
//!                                      │
//!                                      ▼
//!                           acquire() returns the first cause
//! ```
//!
//! ## Rules
//! - **At most once**: only the first release records a cause; later ones return `false`
//! - **No missed wakeup**: a release before `acquire` is remembered
//! - **No timeout**: `acquire` waits until a release happens
//! - **Cloneable**: clones share the same gate

use std::fmt;
use std::sync::{Arc, OnceLock};

use tokio_util::sync::CancellationToken;

/// Why the gate was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Release {
    /// OS termination signal (SIGINT/SIGTERM/SIGQUIT, Ctrl-C).
    Signal,
    /// `ExitSystemRequest` event.
    ExitRequest,
    /// The wait could not continue (e.g. signal listeners failed to install).
    Interrupted(Arc<str>),
}

impl Release {
    /// Interruption cause, carried into the shutdown event.
    pub fn cause(&self) -> Option<&str> {
        match self {
            Release::Interrupted(cause) => Some(&**cause),
            _ => None,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            Release::Signal => "os_signal",
            Release::ExitRequest => "exit_request",
            Release::Interrupted(_) => "interrupted",
        }
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Release::Interrupted(cause) => write!(f, "interrupted: {cause}"),
            other => f.write_str(other.as_label()),
        }
    }
}

#[derive(Default)]
struct Inner {
    token: CancellationToken,
    release: OnceLock<Release>,
}

/// One-shot gate blocking the run phase.
#[derive(Clone, Default)]
pub struct TerminationGate {
    inner: Arc<Inner>,
}

impl TerminationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases the gate.
    ///
    /// Returns `true` if this call was the effective release.
    pub fn release(&self, why: Release) -> bool {
        // The cause is stored before the token fires, so a woken waiter always sees it.
        let first = self.inner.release.set(why).is_ok();
        self.inner.token.cancel();
        first
    }

    /// True once any release happened.
    pub fn is_released(&self) -> bool {
        self.inner.token.is_cancelled()
    }

    /// Cause of the effective release, if released.
    pub fn try_acquire(&self) -> Option<Release> {
        self.inner.release.get().cloned()
    }

    /// Waits for the gate to be released and returns the effective cause.
    pub async fn acquire(&self) -> Release {
        self.inner.token.cancelled().await;
        self.try_acquire().unwrap_or(Release::Signal)
    }
}

impl fmt::Debug for TerminationGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminationGate")
            .field("release", &self.inner.release.get())
            .finish()
    }
}
