//! # Command line configuration.
//!
//! - [`CliConfigProvider`] - parses process arguments and forwards them to the tracer
//! - [`OptionSyntax`] / [`OptionPair`] / [`tokenize`] - the option grammar
//! - [`ConfigTracer`] - sink for configuration changes

mod option;
mod provider;
mod tracer;

pub use option::{FLAG_VALUE, OptionPair, OptionSyntax, tokenize};
pub use provider::{CliConfigProvider, ParseSummary};
pub use tracer::{ConfigTracer, ConfigTracerRef, QUALIFY_SYSTEM, qualify_system};
