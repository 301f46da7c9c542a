//! # Service tags and the basic-service vocabulary.
//!
//! A [`Tag`] is a string label attached to a service when it is discovered.
//! Services carrying at least one tag from [`BASIC_TAGS`] are *basic*: they are
//! registered and activated before anything else runs.
//!
//! The vocabulary order is significant: basic services are activated tag by tag
//! in exactly this order.

use std::borrow::Cow;
use std::fmt;

/// String label attached to a service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(Cow<'static, str>);

impl Tag {
    pub const REGISTRY: Tag = Tag(Cow::Borrowed("registry"));
    pub const CONFIG: Tag = Tag(Cow::Borrowed("config"));
    pub const LOG: Tag = Tag(Cow::Borrowed("log"));
    pub const EVENT: Tag = Tag(Cow::Borrowed("event"));
    pub const BEHAVIOR: Tag = Tag(Cow::Borrowed("behavior"));
    pub const PROFILE: Tag = Tag(Cow::Borrowed("profile"));
    pub const APPLICATION: Tag = Tag(Cow::Borrowed("application"));

    /// Creates a tag from any string.
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self(label.into())
    }

    /// Returns the label.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if this tag belongs to the default basic vocabulary.
    pub fn is_basic(&self) -> bool {
        BASIC_TAGS.contains(self)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Tag {
    fn from(label: &'static str) -> Self {
        Self(Cow::Borrowed(label))
    }
}

impl From<String> for Tag {
    fn from(label: String) -> Self {
        Self(Cow::Owned(label))
    }
}

/// Basic-service vocabulary in activation order.
pub static BASIC_TAGS: [Tag; 7] = [
    Tag::REGISTRY,
    Tag::CONFIG,
    Tag::LOG,
    Tag::EVENT,
    Tag::BEHAVIOR,
    Tag::PROFILE,
    Tag::APPLICATION,
];
