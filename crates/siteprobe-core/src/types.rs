//! Shared types used across SiteProbe.
//!
//! Both newtypes are deliberately thin: addresses are opaque and only
//! trimmed, requester identities are never interpreted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A target resource submitted for probing.
///
/// Surrounding whitespace is trimmed; nothing else is validated or
/// canonicalized, so a malformed address surfaces later as a fetch failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Create a new `Address` from a string.
    #[must_use]
    pub fn new(address: impl AsRef<str>) -> Self {
        Self(address.as_ref().trim().to_string())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive a sibling address by appending `suffix` after stripping
    /// trailing slashes.
    ///
    /// ```rust
    /// use siteprobe_core::Address;
    ///
    /// let base = Address::new("https://shop.example.com/");
    /// assert_eq!(base.join_suffix("/graphql").as_str(), "https://shop.example.com/graphql");
    /// ```
    #[must_use]
    pub fn join_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}{suffix}", self.0.trim_end_matches('/')))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identity of whoever issued a request, used to key the throttle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequesterId(String);

impl RequesterId {
    /// Create a new `RequesterId`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
