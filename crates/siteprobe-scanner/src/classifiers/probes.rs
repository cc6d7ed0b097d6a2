//! Classifiers that issue a secondary fetch against a derived address.

use super::{detect_api_schema_tokens, PageText};
use crate::fetcher::PageFetcher;
use siteprobe_core::Address;
use std::fmt;

/// Suffix probed for an exposed GraphQL endpoint.
pub const GRAPHQL_SUFFIX: &str = "/graphql";

/// Suffix of the account page that stores a payment method.
pub const AUTH_PATH_SUFFIX: &str = "/my-account/add-payment-method/";

/// Result of the authenticated-path probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPath {
    /// The account path answered 200.
    Auth,
    /// Any other status, or the probe failed.
    None,
}

impl fmt::Display for AuthPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth => write!(f, "Auth"),
            Self::None => write!(f, "None"),
        }
    }
}

/// GraphQL exposure: body tokens first, then the `/graphql` endpoint.
///
/// The endpoint is only fetched when the body had no schema tokens.
pub async fn detect_api_schema(
    fetcher: &dyn PageFetcher,
    address: &Address,
    page: &PageText<'_>,
) -> bool {
    if detect_api_schema_tokens(page) {
        return true;
    }

    let endpoint = address.join_suffix(GRAPHQL_SUFFIX);
    matches!(fetcher.fetch(&endpoint).await, Ok(response) if response.is_ok())
}

/// Probe the account payment-method path.
///
/// Only the status code is checked, so a site answering 200 for every path
/// reports `Auth`.
pub async fn probe_auth_path(fetcher: &dyn PageFetcher, address: &Address) -> AuthPath {
    let account_page = address.join_suffix(AUTH_PATH_SUFFIX);
    match fetcher.fetch(&account_page).await {
        Ok(response) if response.is_ok() => AuthPath::Auth,
        _ => AuthPath::None,
    }
}
