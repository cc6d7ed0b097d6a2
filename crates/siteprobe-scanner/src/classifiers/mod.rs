//! Page classifiers.
//!
//! Every body classifier is a scan over a declarative [`TokenRule`] table in
//! [`tables`]. Adding a provider, processor, or platform is a new table row.
//! The two classifiers that issue a secondary fetch live in [`probes`].

pub mod body;
pub mod probes;
pub mod tables;

pub use body::{
    detect_api_schema_tokens, detect_challenge_page, detect_edge_proxy, detect_error_disclosure,
    detect_payment_processors, identify_platform,
};
pub use probes::{detect_api_schema, probe_auth_path, AuthPath};

/// How a rule's token is compared against the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// Exact substring of the raw body.
    Sensitive,
    /// Substring of the lower-cased body. The token itself must be lower-case.
    Insensitive,
}

/// One row of a classifier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRule {
    pub token: &'static str,
    pub label: &'static str,
    pub case: Case,
}

impl TokenRule {
    #[must_use]
    pub const fn sensitive(token: &'static str, label: &'static str) -> Self {
        Self {
            token,
            label,
            case: Case::Sensitive,
        }
    }

    #[must_use]
    pub const fn insensitive(token: &'static str, label: &'static str) -> Self {
        Self {
            token,
            label,
            case: Case::Insensitive,
        }
    }

    fn matches(&self, page: &PageText<'_>) -> bool {
        match self.case {
            Case::Sensitive => page.raw.contains(self.token),
            Case::Insensitive => page.lower.contains(self.token),
        }
    }
}

/// A page body prepared for scanning; lower-cased once, shared by all tables.
#[derive(Debug)]
pub struct PageText<'a> {
    raw: &'a str,
    lower: String,
}

impl<'a> PageText<'a> {
    #[must_use]
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            lower: raw.to_lowercase(),
        }
    }

    /// True if any rule matches.
    #[must_use]
    pub fn any(&self, rules: &[TokenRule]) -> bool {
        rules.iter().any(|rule| rule.matches(self))
    }

    /// Label of the first matching rule in table order.
    #[must_use]
    pub fn first(&self, rules: &[TokenRule]) -> Option<&'static str> {
        rules
            .iter()
            .find(|rule| rule.matches(self))
            .map(|rule| rule.label)
    }

    /// Labels of every matching rule in table order, each label once.
    #[must_use]
    pub fn all(&self, rules: &[TokenRule]) -> Vec<&'static str> {
        let mut labels = Vec::new();
        for rule in rules {
            if !labels.contains(&rule.label) && rule.matches(self) {
                labels.push(rule.label);
            }
        }
        labels
    }
}
