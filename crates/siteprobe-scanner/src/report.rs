//! Fixed-shape fingerprint report.

use crate::classifiers::AuthPath;
use siteprobe_core::Address;
use std::fmt;

/// Sentinel text for an empty payment-processor match set.
pub const NO_PAYMENT_PROCESSOR: &str = "No recognized payment gateway found";

/// Sentinel text when the page itself could not be fetched.
pub const PAYMENT_UNREACHABLE: &str = "Error accessing the website";

/// Text for a positive error-disclosure verdict.
pub const ERROR_LOGS_FOUND: &str = "Error logs found";

/// Text for a negative label verdict.
pub const NONE_LABEL: &str = "None";

/// Text for a failed verdict.
pub const ERROR_LABEL: &str = "Error";

/// One classifier's conclusion, or the sentinel when it could not run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<T> {
    Known(T),
    Unknown,
}

impl<T> Verdict<T> {
    #[must_use]
    pub fn known(&self) -> Option<&T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

/// The eight classifiers every report carries, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassifierKind {
    PaymentProcessor,
    ChallengePage,
    EdgeProxy,
    ApiSchema,
    AuthPath,
    Platform,
    ErrorDisclosure,
    StatusCode,
}

impl ClassifierKind {
    pub const ALL: [Self; 8] = [
        Self::PaymentProcessor,
        Self::ChallengePage,
        Self::EdgeProxy,
        Self::ApiSchema,
        Self::AuthPath,
        Self::Platform,
        Self::ErrorDisclosure,
        Self::StatusCode,
    ];

    /// Human-readable field name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PaymentProcessor => "Payment Gateways",
            Self::ChallengePage => "Captcha",
            Self::EdgeProxy => "Cloudflare",
            Self::ApiSchema => "GraphQL",
            Self::AuthPath => "Auth Path",
            Self::Platform => "Platform",
            Self::ErrorDisclosure => "Error Logs",
            Self::StatusCode => "Status",
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every verdict for one address. Built only by [`crate::ReportBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteReport {
    pub(crate) address: Address,
    pub(crate) payment_processors: Verdict<Vec<&'static str>>,
    pub(crate) challenge_page: Verdict<bool>,
    pub(crate) edge_proxy: Verdict<bool>,
    pub(crate) api_schema: Verdict<bool>,
    pub(crate) auth_path: Verdict<AuthPath>,
    pub(crate) platform: Verdict<Option<&'static str>>,
    pub(crate) error_disclosure: Verdict<bool>,
    pub(crate) status: Verdict<u16>,
}

impl SiteReport {
    /// Report for an address whose every classifier failed.
    #[must_use]
    pub fn unreachable(address: Address) -> Self {
        Self {
            address,
            payment_processors: Verdict::Unknown,
            challenge_page: Verdict::Unknown,
            edge_proxy: Verdict::Unknown,
            api_schema: Verdict::Unknown,
            auth_path: Verdict::Unknown,
            platform: Verdict::Unknown,
            error_disclosure: Verdict::Unknown,
            status: Verdict::Unknown,
        }
    }

    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    #[must_use]
    pub fn payment_processors(&self) -> &Verdict<Vec<&'static str>> {
        &self.payment_processors
    }

    #[must_use]
    pub fn challenge_page(&self) -> &Verdict<bool> {
        &self.challenge_page
    }

    #[must_use]
    pub fn edge_proxy(&self) -> &Verdict<bool> {
        &self.edge_proxy
    }

    #[must_use]
    pub fn api_schema(&self) -> &Verdict<bool> {
        &self.api_schema
    }

    #[must_use]
    pub fn auth_path(&self) -> &Verdict<AuthPath> {
        &self.auth_path
    }

    #[must_use]
    pub fn platform(&self) -> &Verdict<Option<&'static str>> {
        &self.platform
    }

    #[must_use]
    pub fn error_disclosure(&self) -> &Verdict<bool> {
        &self.error_disclosure
    }

    #[must_use]
    pub fn status(&self) -> &Verdict<u16> {
        &self.status
    }

    /// True when every verdict is the sentinel.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        ClassifierKind::ALL
            .iter()
            .all(|&kind| self.is_unknown(kind))
    }

    /// Whether a single classifier failed.
    #[must_use]
    pub fn is_unknown(&self, kind: ClassifierKind) -> bool {
        match kind {
            ClassifierKind::PaymentProcessor => self.payment_processors.is_unknown(),
            ClassifierKind::ChallengePage => self.challenge_page.is_unknown(),
            ClassifierKind::EdgeProxy => self.edge_proxy.is_unknown(),
            ClassifierKind::ApiSchema => self.api_schema.is_unknown(),
            ClassifierKind::AuthPath => self.auth_path.is_unknown(),
            ClassifierKind::Platform => self.platform.is_unknown(),
            ClassifierKind::ErrorDisclosure => self.error_disclosure.is_unknown(),
            ClassifierKind::StatusCode => self.status.is_unknown(),
        }
    }

    /// Rendered value of one classifier.
    ///
    /// A sentinel on an unreachable page reads as the negative for its field
    /// (`False`, `None`, or the access-error text). A sentinel on a page that
    /// did load means the classifier itself failed and renders as `Error`.
    #[must_use]
    pub fn value(&self, kind: ClassifierKind) -> String {
        let rendered = match kind {
            ClassifierKind::PaymentProcessor => self.payment_processors.known().map(|labels| {
                if labels.is_empty() {
                    NO_PAYMENT_PROCESSOR.to_string()
                } else {
                    labels.join(", ")
                }
            }),
            ClassifierKind::ChallengePage => self.challenge_page.known().map(|&found| flag(found)),
            ClassifierKind::EdgeProxy => self.edge_proxy.known().map(|&found| flag(found)),
            ClassifierKind::ApiSchema => self.api_schema.known().map(|&found| flag(found)),
            ClassifierKind::AuthPath => self.auth_path.known().map(ToString::to_string),
            ClassifierKind::Platform => self
                .platform
                .known()
                .map(|&platform| platform.unwrap_or(NONE_LABEL).to_string()),
            ClassifierKind::ErrorDisclosure => self.error_disclosure.known().map(|&found| {
                let text = if found { ERROR_LOGS_FOUND } else { NONE_LABEL };
                text.to_string()
            }),
            ClassifierKind::StatusCode => self.status.known().map(ToString::to_string),
        };
        rendered.unwrap_or_else(|| self.sentinel(kind).to_string())
    }

    fn sentinel(&self, kind: ClassifierKind) -> &'static str {
        if !self.is_unreachable() {
            return ERROR_LABEL;
        }
        match kind {
            ClassifierKind::PaymentProcessor => PAYMENT_UNREACHABLE,
            ClassifierKind::ChallengePage | ClassifierKind::EdgeProxy | ClassifierKind::ApiSchema => {
                "False"
            }
            ClassifierKind::AuthPath | ClassifierKind::Platform | ClassifierKind::ErrorDisclosure => {
                NONE_LABEL
            }
            ClassifierKind::StatusCode => ERROR_LABEL,
        }
    }

    /// The fixed classifier → value mapping, always eight entries.
    #[must_use]
    pub fn entries(&self) -> [(ClassifierKind, String); 8] {
        ClassifierKind::ALL.map(|kind| (kind, self.value(kind)))
    }
}

fn flag(found: bool) -> String {
    let text = if found { "True" } else { "False" };
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SiteReport {
        SiteReport {
            address: Address::new("https://shop.test"),
            payment_processors: Verdict::Known(vec!["Stripe", "Paypal"]),
            challenge_page: Verdict::Known(true),
            edge_proxy: Verdict::Known(false),
            api_schema: Verdict::Unknown,
            auth_path: Verdict::Known(AuthPath::Auth),
            platform: Verdict::Known(Some("WordPress")),
            error_disclosure: Verdict::Known(false),
            status: Verdict::Known(200),
        }
    }

    #[test]
    fn test_entries_cover_every_kind() {
        let entries = sample().entries();
        let kinds: Vec<_> = entries.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(kinds, ClassifierKind::ALL.to_vec());
    }

    #[test]
    fn test_rendered_values() {
        let report = sample();
        assert_eq!(report.value(ClassifierKind::PaymentProcessor), "Stripe, Paypal");
        assert_eq!(report.value(ClassifierKind::ChallengePage), "True");
        assert_eq!(report.value(ClassifierKind::EdgeProxy), "False");
        assert_eq!(report.value(ClassifierKind::ApiSchema), ERROR_LABEL);
        assert_eq!(report.value(ClassifierKind::AuthPath), "Auth");
        assert_eq!(report.value(ClassifierKind::Platform), "WordPress");
        assert_eq!(report.value(ClassifierKind::ErrorDisclosure), "None");
        assert_eq!(report.value(ClassifierKind::StatusCode), "200");
        assert!(report.is_unknown(ClassifierKind::ApiSchema));
        assert!(!report.is_unreachable());
    }

    #[test]
    fn test_unreachable_sentinels() {
        let report = SiteReport::unreachable(Address::new("https://down.test"));
        assert!(report.is_unreachable());
        assert_eq!(
            report.value(ClassifierKind::PaymentProcessor),
            PAYMENT_UNREACHABLE
        );
        assert_eq!(report.value(ClassifierKind::StatusCode), "Error");
        assert_eq!(report.value(ClassifierKind::AuthPath), "None");
        assert_eq!(report.value(ClassifierKind::ChallengePage), "False");
        assert_eq!(report.value(ClassifierKind::ApiSchema), "False");
        assert_eq!(report.value(ClassifierKind::Platform), "None");
        assert_eq!(report.value(ClassifierKind::ErrorDisclosure), "None");
    }

    #[test]
    fn test_failed_classifier_on_loaded_page_renders_error() {
        let report = SiteReport {
            address: Address::new("https://shop.test"),
            payment_processors: Verdict::Unknown,
            challenge_page: Verdict::Unknown,
            edge_proxy: Verdict::Unknown,
            api_schema: Verdict::Unknown,
            auth_path: Verdict::Unknown,
            platform: Verdict::Unknown,
            error_disclosure: Verdict::Unknown,
            status: Verdict::Known(200),
        };
        assert!(!report.is_unreachable());
        for kind in ClassifierKind::ALL {
            if kind == ClassifierKind::StatusCode {
                assert_eq!(report.value(kind), "200");
            } else {
                assert_eq!(report.value(kind), ERROR_LABEL, "{kind}");
            }
        }
    }

    #[test]
    fn test_empty_payment_set_sentinel() {
        let mut report = sample();
        report.payment_processors = Verdict::Known(Vec::new());
        assert_eq!(
            report.value(ClassifierKind::PaymentProcessor),
            NO_PAYMENT_PROCESSOR
        );
    }
}
