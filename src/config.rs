//! # Bootstrap configuration.
//!
//! Provides [`BootstrapConfig`] centralized settings for the bootstrap sequence.
//!
//! Config is used in two ways:
//! 1. **Bootstrap creation**: `Bootstrap::builder(config)`
//! 2. **Command line syntax**: applied to the discovered provider in every run,
//!    or to a standalone provider through `CliConfigProvider::from_config(&config, tracer)`
//!
//! ## Sentinel values
//! - empty `option_prefix` → falls back to [`DEFAULT_OPTION_PREFIX`]
//! - empty `basic_tags` → falls back to [`BASIC_TAGS`]

use crate::services::{BASIC_TAGS, Tag};

/// Default prefix every command line option must start with.
pub const DEFAULT_OPTION_PREFIX: &str = "-";

/// Default separator between an option name and its value.
pub const DEFAULT_OPTION_SEPARATOR: &str = "=";

/// Global configuration for the bootstrap sequence.
///
/// ## Field semantics
/// - `option_prefix`: prefix of every command line option (`-` by default, never empty)
/// - `option_separator`: splits an option into name and value (`=` by default)
/// - `basic_tags`: tags that mark a service as basic, in activation order
/// - `handle_os_signals`: whether the run phase listens for OS termination signals
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks across the codebase.
#[derive(Clone, Debug)]
pub struct BootstrapConfig {
    /// Prefix every command line option must start with.
    ///
    /// During a bootstrap run this and `option_separator` replace the syntax the
    /// discovered `CliConfigProvider` was built with.
    pub option_prefix: String,

    /// Separator between the option name and its value.
    ///
    /// An empty separator never splits, so every option is a flag cluster.
    pub option_separator: String,

    /// Basic service vocabulary, in activation order.
    pub basic_tags: Vec<Tag>,

    /// Listen for SIGINT/SIGTERM/SIGQUIT (Ctrl-C on Windows) during the run phase.
    ///
    /// When disabled, only an `ExitSystemRequest` event ends the run phase.
    pub handle_os_signals: bool,
}

impl BootstrapConfig {
    /// Returns the option prefix, falling back to the default when empty.
    #[inline]
    pub fn prefix(&self) -> &str {
        if self.option_prefix.is_empty() {
            DEFAULT_OPTION_PREFIX
        } else {
            &self.option_prefix
        }
    }

    /// Returns the basic tag vocabulary, falling back to [`BASIC_TAGS`] when empty.
    #[inline]
    pub fn basic_tags(&self) -> &[Tag] {
        if self.basic_tags.is_empty() {
            &BASIC_TAGS
        } else {
            &self.basic_tags
        }
    }
}

impl Default for BootstrapConfig {
    /// Default configuration:
    ///
    /// - `option_prefix = "-"`
    /// - `option_separator = "="`
    /// - `basic_tags = BASIC_TAGS` (registry, config, log, event, behavior, profile, application)
    /// - `handle_os_signals = true`
    fn default() -> Self {
        Self {
            option_prefix: DEFAULT_OPTION_PREFIX.to_string(),
            option_separator: DEFAULT_OPTION_SEPARATOR.to_string(),
            basic_tags: BASIC_TAGS.to_vec(),
            handle_os_signals: true,
        }
    }
}
