//! Batch runner for probing many addresses at once.
//!
//! Addresses are probed on spawned tasks, at most `concurrency` at a time.
//! Output slot `i` always holds the report for input `i`, whatever order the
//! probes finish in.

use crate::builder::ReportBuilder;
use crate::error::{Result, ScanError};
use crate::report::SiteReport;
use futures::stream::{self, StreamExt};
use siteprobe_core::{Address, BatchConfig};
use std::ops::RangeInclusive;

/// Runs a [`ReportBuilder`] over an ordered list of addresses.
#[derive(Clone)]
pub struct BatchRunner {
    builder: ReportBuilder,
    accepted_sizes: RangeInclusive<usize>,
    concurrency: usize,
}

impl BatchRunner {
    /// Create a runner accepting 50–100 addresses, probing 8 at a time.
    #[must_use]
    pub fn new(builder: ReportBuilder) -> Self {
        Self::from_config(builder, &BatchConfig::default())
    }

    #[must_use]
    pub fn from_config(builder: ReportBuilder, config: &BatchConfig) -> Self {
        Self {
            builder,
            accepted_sizes: config.min_addresses..=config.max_addresses,
            concurrency: config.concurrency.max(1),
        }
    }

    /// Set the maximum number of addresses probed at once. `1` is serial.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the accepted batch sizes (inclusive).
    #[must_use]
    pub fn with_accepted_sizes(mut self, sizes: RangeInclusive<usize>) -> Self {
        self.accepted_sizes = sizes;
        self
    }

    /// Reject a batch whose length is outside the accepted range.
    pub fn validate(&self, len: usize) -> Result<()> {
        if self.accepted_sizes.contains(&len) {
            Ok(())
        } else {
            Err(ScanError::InvalidBatchSize {
                min: *self.accepted_sizes.start(),
                max: *self.accepted_sizes.end(),
                actual: len,
            })
        }
    }

    /// Probe every address and return one report per address, in input order.
    ///
    /// The size check runs before any network activity. Per-address failures
    /// (including a panicked task) become all-sentinel reports and never
    /// abort the batch.
    pub async fn run(&self, addresses: Vec<Address>) -> Result<Vec<SiteReport>> {
        self.validate(addresses.len())?;

        let batch_id = uuid::Uuid::new_v4();
        let total = addresses.len();
        tracing::info!(
            "Batch {} started: {} addresses, concurrency {}",
            batch_id,
            total,
            self.concurrency
        );

        let reports: Vec<SiteReport> = stream::iter(addresses)
            .map(|address| {
                let builder = self.builder.clone();
                async move {
                    let task_address = address.clone();
                    match tokio::spawn(async move { builder.build(&task_address).await }).await {
                        Ok(report) => report,
                        Err(e) => {
                            tracing::error!("Probe task for {} failed: {}", address, e);
                            SiteReport::unreachable(address)
                        }
                    }
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let unreachable = reports.iter().filter(|r| r.is_unreachable()).count();
        tracing::info!(
            "Batch {} finished: {} reports, {} unreachable",
            batch_id,
            reports.len(),
            unreachable
        );

        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::{FetchResult, PageFetcher, PageResponse};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingStub {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PageFetcher for CountingStub {
        async fn fetch(&self, _address: &Address) -> FetchResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PageResponse {
                status: 200,
                body: String::new(),
            })
        }
    }

    fn addresses(n: usize) -> Vec<Address> {
        (0..n)
            .map(|i| Address::new(format!("https://site{i}.test")))
            .collect()
    }

    fn runner(stub: Arc<CountingStub>) -> BatchRunner {
        BatchRunner::new(ReportBuilder::new(stub))
    }

    #[tokio::test]
    async fn test_rejects_out_of_range_without_fetching() {
        let stub = Arc::new(CountingStub {
            calls: AtomicUsize::new(0),
        });
        let runner = runner(stub.clone());

        for n in [0, 49, 101] {
            let err = runner.run(addresses(n)).await.expect_err("rejected");
            assert!(matches!(err, ScanError::InvalidBatchSize { actual, .. } if actual == n));
        }
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_accepts_range_bounds() {
        let stub = Arc::new(CountingStub {
            calls: AtomicUsize::new(0),
        });
        let runner = runner(stub);

        for n in [50, 100] {
            let reports = runner.run(addresses(n)).await.expect("accepted");
            assert_eq!(reports.len(), n);
        }
    }

    #[test]
    fn test_concurrency_floor() {
        let stub = Arc::new(CountingStub {
            calls: AtomicUsize::new(0),
        });
        let runner = runner(stub).with_concurrency(0);
        assert_eq!(runner.concurrency, 1);
    }
}
