//! Report builder: one address in, one fixed-shape report out.
//!
//! A single primary fetch feeds every body classifier. Each classifier runs
//! behind a panic boundary so one fault only costs its own verdict.

use crate::classifiers::{
    detect_api_schema, detect_challenge_page, detect_edge_proxy, detect_error_disclosure,
    detect_payment_processors, identify_platform, probe_auth_path, PageText,
};
use crate::error::Result;
use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::report::{ClassifierKind, SiteReport, Verdict};
use futures::FutureExt;
use siteprobe_core::{Address, FetchConfig};
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Builds a [`SiteReport`] per address.
#[derive(Clone)]
pub struct ReportBuilder {
    fetcher: Arc<dyn PageFetcher>,
}

impl ReportBuilder {
    #[must_use]
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Builder backed by an [`HttpFetcher`].
    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpFetcher::new(config)?)))
    }

    /// Probe one address.
    ///
    /// Never fails: an unreachable address yields an all-sentinel report and
    /// no secondary probes are issued for it.
    pub async fn build(&self, address: &Address) -> SiteReport {
        let response = match self.fetcher.fetch(address).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("{} unreachable, reporting sentinels: {}", address, e);
                return SiteReport::unreachable(address.clone());
            }
        };

        let page = PageText::new(&response.body);
        let fetcher = self.fetcher.as_ref();

        let payment_processors = isolate(address, ClassifierKind::PaymentProcessor, || {
            detect_payment_processors(&page)
        });
        let challenge_page = isolate(address, ClassifierKind::ChallengePage, || {
            detect_challenge_page(&page)
        });
        let edge_proxy = isolate(address, ClassifierKind::EdgeProxy, || detect_edge_proxy(&page));
        let platform = isolate(address, ClassifierKind::Platform, || identify_platform(&page));
        let error_disclosure = isolate(address, ClassifierKind::ErrorDisclosure, || {
            detect_error_disclosure(&page)
        });

        let (api_schema, auth_path) = futures::join!(
            isolate_async(
                address,
                ClassifierKind::ApiSchema,
                detect_api_schema(fetcher, address, &page),
            ),
            isolate_async(
                address,
                ClassifierKind::AuthPath,
                probe_auth_path(fetcher, address),
            ),
        );

        tracing::debug!("Built report for {} (HTTP {})", address, response.status);

        SiteReport {
            address: address.clone(),
            payment_processors,
            challenge_page,
            edge_proxy,
            api_schema,
            auth_path,
            platform,
            error_disclosure,
            status: Verdict::Known(response.status),
        }
    }
}

fn isolate<T>(address: &Address, kind: ClassifierKind, classify: impl FnOnce() -> T) -> Verdict<T> {
    match panic::catch_unwind(AssertUnwindSafe(classify)) {
        Ok(value) => Verdict::Known(value),
        Err(_) => {
            tracing::error!("{} classifier panicked for {}", kind, address);
            Verdict::Unknown
        }
    }
}

async fn isolate_async<T>(
    address: &Address,
    kind: ClassifierKind,
    classify: impl Future<Output = T>,
) -> Verdict<T> {
    match AssertUnwindSafe(classify).catch_unwind().await {
        Ok(value) => Verdict::Known(value),
        Err(_) => {
            tracing::error!("{} classifier panicked for {}", kind, address);
            Verdict::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::AuthPath;
    use crate::error::FetchError;
    use crate::fetcher::{FetchResult, PageResponse};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves one body at the base address; panics on `/graphql`; 404 elsewhere.
    struct ShopStub {
        body: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PageFetcher for ShopStub {
        async fn fetch(&self, address: &Address) -> FetchResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let url = address.as_str();
            if url.ends_with("/graphql") {
                panic!("stub fault");
            }
            if url.ends_with("/add-payment-method/") {
                return Ok(PageResponse {
                    status: 404,
                    body: String::new(),
                });
            }
            Ok(PageResponse {
                status: 200,
                body: self.body.to_string(),
            })
        }
    }

    struct DownStub {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PageFetcher for DownStub {
        async fn fetch(&self, address: &Address) -> FetchResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(FetchError::Timeout {
                address: address.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_panicking_probe_only_loses_its_verdict() {
        let stub = Arc::new(ShopStub {
            body: "<script src=js.stripe.com></script> wp-content WordPress",
            calls: AtomicUsize::new(0),
        });
        let builder = ReportBuilder::new(stub);
        let report = builder.build(&Address::new("https://shop.test")).await;

        assert!(report.api_schema().is_unknown());
        assert_eq!(report.value(ClassifierKind::ApiSchema), "Error");
        assert_eq!(report.value(ClassifierKind::EdgeProxy), "False");
        assert_eq!(report.payment_processors(), &Verdict::Known(vec!["Stripe"]));
        assert_eq!(report.platform(), &Verdict::Known(Some("WordPress")));
        assert_eq!(report.auth_path(), &Verdict::Known(AuthPath::None));
        assert_eq!(report.status(), &Verdict::Known(200));
        assert_eq!(report.entries().len(), 8);
    }

    #[tokio::test]
    async fn test_unreachable_address_skips_secondary_probes() {
        let stub = Arc::new(DownStub {
            calls: AtomicUsize::new(0),
        });
        let builder = ReportBuilder::new(stub.clone());
        let report = builder.build(&Address::new("https://down.test")).await;

        assert!(report.is_unreachable());
        assert_eq!(report.value(ClassifierKind::StatusCode), "Error");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }
}
