//! Single-shot page fetching.
//!
//! [`PageFetcher`] is the seam every classifier fetches through, so tests can
//! substitute a stub. [`HttpFetcher`] is the production implementation on top
//! of `reqwest` with a mandatory whole-request timeout.

use crate::error::{FetchError, Result, ScanError};
use async_trait::async_trait;
use reqwest::Client;
use siteprobe_core::{Address, FetchConfig};

/// HTTP status treated as success by the secondary probes.
pub const STATUS_OK: u16 = 200;

/// A fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    pub status: u16,
    pub body: String,
}

impl PageResponse {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Outcome of one fetch. Failures are values, never panics.
pub type FetchResult = std::result::Result<PageResponse, FetchError>;

/// Performs one outbound GET per call. No retries.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, address: &Address) -> FetchResult;
}

/// `reqwest`-backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher from config.
    ///
    /// The timeout covers connect, headers, and body, so a hung server can
    /// never stall a caller past `config.timeout()`.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ScanError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, address: &Address) -> FetchResult {
        let url = address.as_str();

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                let err = FetchError::from_reqwest(url, &e);
                tracing::warn!("Fetch failed: {}", err);
                return Err(err);
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => {
                tracing::debug!("Fetched {} (HTTP {}, {} bytes)", url, status, body.len());
                Ok(PageResponse { status, body })
            }
            Err(e) => {
                let err = FetchError::from_reqwest(url, &e);
                tracing::warn!("Fetch failed: {}", err);
                Err(err)
            }
        }
    }
}
