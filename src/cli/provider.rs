//! # Command line config provider.
//!
//! [`CliConfigProvider`] turns process arguments into configuration overrides:
//!
//! ```text
//! "-x"      : x option, boolean value always "true"
//! "-x=???"  : x option with value "???"
//! "-xtrf"   : x, t, r, f options, each "true"
//! ```
//!
//! Each option is forwarded to the [`ConfigTracer`] as soon as it is parsed,
//! keyed `system.<name>`. Invalid arguments are logged and skipped.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::BootstrapConfig;
use crate::error::CliOptionError;
use crate::services::{Capability, Service, ServiceHandle, Tag};

use super::option::{OptionPair, OptionSyntax, tokenize};
use super::tracer::{ConfigTracerRef, qualify_system};

/// Outcome of [`CliConfigProvider::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseSummary {
    /// Number of options forwarded to the tracer.
    pub forwarded: usize,
    /// Arguments that were skipped, in argument order.
    pub rejected: Vec<CliOptionError>,
}

/// Parses command line options into the config tracer.
pub struct CliConfigProvider {
    syntax: OptionSyntax,
    tracer: ConfigTracerRef,
}

impl CliConfigProvider {
    /// Creates a provider with the default `-` prefix and `=` separator.
    pub fn new(tracer: ConfigTracerRef) -> Self {
        Self {
            syntax: OptionSyntax::default(),
            tracer,
        }
    }

    /// Creates a provider using the prefix and separator from `cfg`.
    pub fn from_config(cfg: &BootstrapConfig, tracer: ConfigTracerRef) -> Self {
        Self {
            syntax: OptionSyntax::from_config(cfg),
            tracer,
        }
    }

    /// Replaces the option prefix. Empty prefixes are rejected.
    pub fn set_option_prefix(&mut self, prefix: impl Into<String>) -> Result<(), CliOptionError> {
        self.syntax.set_prefix(prefix.into())
    }

    /// Replaces the value separator.
    pub fn set_option_value_separator(&mut self, separator: impl Into<String>) {
        self.syntax.set_separator(separator.into());
    }

    pub fn syntax(&self) -> &OptionSyntax {
        &self.syntax
    }

    /// Wraps the provider into a `config`-tagged handle for discovery.
    pub fn into_handle(self) -> ServiceHandle {
        ServiceHandle::tagged(Arc::new(self), [Tag::CONFIG])
    }

    /// Parses `args` without forwarding anything.
    pub fn options<I, S>(&self, args: I) -> Vec<Result<OptionPair, CliOptionError>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokenize(args, &self.syntax).collect()
    }

    /// Parses `args` and forwards every option to the tracer in order.
    pub fn parse<I, S>(&self, args: I) -> ParseSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse_with(args, &self.syntax)
    }

    /// Same as [`parse`](Self::parse), but with `syntax` instead of the provider's own.
    pub fn parse_with<I, S>(&self, args: I, syntax: &OptionSyntax) -> ParseSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut summary = ParseSummary::default();
        for item in tokenize(args, syntax) {
            match item {
                Ok(pair) => {
                    let key = qualify_system(&pair.key);
                    debug!(key = %key, value = %pair.value, "command line option");
                    self.tracer.on_change(&key, &pair.value);
                    summary.forwarded += 1;
                }
                Err(e) => {
                    warn!(label = e.as_label(), "{e}");
                    summary.rejected.push(e);
                }
            }
        }
        summary
    }
}

impl Service for CliConfigProvider {
    fn name(&self) -> &str {
        "CliConfigProvider"
    }

    fn capabilities(self: Arc<Self>) -> Vec<Capability> {
        vec![Capability::CliConfig(self)]
    }
}
