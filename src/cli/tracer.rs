//! # Config tracer sink.
//!
//! The destination of command line overrides. The store behind it is not part of
//! this crate; the bootstrap only calls [`ConfigTracer::on_change`] and never
//! observes a result.

use std::sync::Arc;

/// Namespace prepended to every command line key.
pub const QUALIFY_SYSTEM: &str = "system.";

/// Shared reference to a tracer (`Arc<dyn ConfigTracer>`).
pub type ConfigTracerRef = Arc<dyn ConfigTracer>;

/// Receives configuration changes, fire-and-forget.
pub trait ConfigTracer: Send + Sync + 'static {
    /// Called once per change with the fully qualified key.
    fn on_change(&self, key: &str, value: &str);
}

/// Returns `key` qualified under [`QUALIFY_SYSTEM`].
pub fn qualify_system(key: &str) -> String {
    format!("{QUALIFY_SYSTEM}{key}")
}
