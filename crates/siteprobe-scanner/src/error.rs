use siteprobe_core::SiteProbeError;
use std::time::Duration;
use thiserror::Error;

/// Transport-level failure of a single fetch.
///
/// Always recovered into sentinel verdicts by the report builder; never
/// surfaced past it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request to {address} timed out")]
    Timeout { address: String },

    #[error("could not connect to {address}: {reason}")]
    Connect { address: String, reason: String },

    #[error("invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("failed to read body from {address}: {reason}")]
    Body { address: String, reason: String },

    #[error("request to {address} failed: {reason}")]
    Request { address: String, reason: String },
}

impl FetchError {
    pub(crate) fn from_reqwest(address: &str, err: &reqwest::Error) -> Self {
        let address = address.to_string();
        if err.is_timeout() {
            Self::Timeout { address }
        } else if err.is_builder() {
            Self::InvalidAddress {
                address,
                reason: err.to_string(),
            }
        } else if err.is_connect() {
            Self::Connect {
                address,
                reason: err.to_string(),
            }
        } else if err.is_body() || err.is_decode() {
            Self::Body {
                address,
                reason: err.to_string(),
            }
        } else {
            Self::Request {
                address,
                reason: err.to_string(),
            }
        }
    }
}

/// Request-level rejections surfaced to the caller before any work begins.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("batch must contain between {min} and {max} addresses, got {actual}")]
    InvalidBatchSize {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("requester {requester} is throttled, retry after {retry_after:?}")]
    Throttled {
        requester: String,
        retry_after: Duration,
    },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl From<ScanError> for SiteProbeError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::InvalidBatchSize { .. } => Self::Validation(err.to_string()),
            ScanError::Throttled { retry_after, .. } => Self::Throttled { retry_after },
            ScanError::ClientBuild(reason) => Self::Network(reason),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
