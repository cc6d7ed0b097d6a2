//! Classifiers that only read the primary page body.

use super::{tables, PageText};

/// Bot-challenge page (reCAPTCHA and generic captcha markers).
#[must_use]
pub fn detect_challenge_page(page: &PageText<'_>) -> bool {
    page.any(tables::CHALLENGE_PAGE)
}

/// Every payment processor referenced by the page, in table order.
#[must_use]
pub fn detect_payment_processors(page: &PageText<'_>) -> Vec<&'static str> {
    page.all(tables::PAYMENT_PROCESSORS)
}

/// Edge proxy in front of the site.
#[must_use]
pub fn detect_edge_proxy(page: &PageText<'_>) -> bool {
    page.any(tables::EDGE_PROXY)
}

/// GraphQL traces in the body alone. See [`super::detect_api_schema`] for
/// the full check including the endpoint probe.
#[must_use]
pub fn detect_api_schema_tokens(page: &PageText<'_>) -> bool {
    page.any(tables::API_SCHEMA)
}

/// First matching platform name.
#[must_use]
pub fn identify_platform(page: &PageText<'_>) -> Option<&'static str> {
    page.first(tables::PLATFORMS)
}

/// Error or exception text visible in the page.
#[must_use]
pub fn detect_error_disclosure(page: &PageText<'_>) -> bool {
    page.any(tables::ERROR_DISCLOSURE)
}
