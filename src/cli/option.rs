//! # Command line option grammar.
//!
//! ```text
//! arg ── blank? ──────────────────────────────► skipped
//!     ── no prefix? ──────────────────────────► InvalidOption (warning)
//!     ── strip prefix, split at first separator
//!          ├─ "abc"   / "abc="   ─► (a,true) (b,true) (c,true)
//!          └─ "name=value"       ─► (name,value)
//! ```
//!
//! [`tokenize`] is pure: the same arguments with the same syntax always produce
//! the same ordered sequence.

use crate::config::{BootstrapConfig, DEFAULT_OPTION_PREFIX, DEFAULT_OPTION_SEPARATOR};
use crate::error::CliOptionError;

/// Value assigned to every option of a flag cluster.
pub const FLAG_VALUE: &str = "true";

/// One parsed option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionPair {
    pub key: String,
    pub value: String,
}

impl OptionPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Boolean flag (`value = "true"`).
    pub fn flag(key: char) -> Self {
        Self::new(key, FLAG_VALUE)
    }
}

/// Option prefix and value separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSyntax {
    prefix: String,
    separator: String,
}

impl OptionSyntax {
    /// Builds a syntax; the prefix must not be empty.
    pub fn new(
        prefix: impl Into<String>,
        separator: impl Into<String>,
    ) -> Result<Self, CliOptionError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(CliOptionError::EmptyPrefix);
        }
        Ok(Self {
            prefix,
            separator: separator.into(),
        })
    }

    pub fn from_config(cfg: &BootstrapConfig) -> Self {
        Self {
            prefix: cfg.prefix().to_string(),
            separator: cfg.option_separator.clone(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub(crate) fn set_prefix(&mut self, prefix: String) -> Result<(), CliOptionError> {
        if prefix.is_empty() {
            return Err(CliOptionError::EmptyPrefix);
        }
        self.prefix = prefix;
        Ok(())
    }

    pub(crate) fn set_separator(&mut self, separator: String) {
        self.separator = separator;
    }

    /// Expands a single raw argument.
    ///
    /// Returns an empty vector for blank arguments.
    pub fn expand(&self, arg: &str) -> Result<Vec<OptionPair>, CliOptionError> {
        if arg.trim().is_empty() {
            return Ok(Vec::new());
        }
        let Some(option) = arg.strip_prefix(self.prefix.as_str()) else {
            return Err(CliOptionError::InvalidOption {
                option: arg.to_string(),
            });
        };

        let (left, right) = match self.split(option) {
            Some((left, right)) => (left, right),
            None => (option, ""),
        };

        if right.is_empty() {
            Ok(left.chars().map(OptionPair::flag).collect())
        } else {
            Ok(vec![OptionPair::new(left, right)])
        }
    }

    fn split<'a>(&self, option: &'a str) -> Option<(&'a str, &'a str)> {
        if self.separator.is_empty() {
            return None;
        }
        option.split_once(self.separator.as_str())
    }
}

impl Default for OptionSyntax {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_OPTION_PREFIX.to_string(),
            separator: DEFAULT_OPTION_SEPARATOR.to_string(),
        }
    }
}

/// Tokenizes `args` into options (and warnings) in argument order.
pub fn tokenize<I, S>(
    args: I,
    syntax: &OptionSyntax,
) -> impl Iterator<Item = Result<OptionPair, CliOptionError>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .flat_map(move |arg| match syntax.expand(arg.as_ref()) {
            Ok(pairs) => pairs.into_iter().map(Ok).collect::<Vec<_>>(),
            Err(e) => vec![Err(e)],
        })
}
