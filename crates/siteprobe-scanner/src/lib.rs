//! SiteProbe Scanner - page fingerprinting pipeline.
//!
//! This crate fetches a page, runs a fixed set of independent classifiers
//! over it, and assembles one fixed-shape report per address. It also runs
//! that pipeline over bounded batches and gates requesters with a throttle.
//!
//! # Features
//!
//! - Table-driven classifiers (challenge page, payment processors, edge
//!   proxy, GraphQL, platform, error disclosure)
//! - Secondary probes for the GraphQL endpoint and the account payment path
//! - Per-classifier fault isolation with sentinel verdicts
//! - Ordered, concurrency-bounded batches with per-address isolation
//! - Per-requester throttle with bounded memory
//!
//! # Example
//!
//! ```rust,ignore
//! use siteprobe_scanner::{BatchRunner, ReportBuilder};
//! use siteprobe_core::{Address, AppConfig};
//!
//! let config = AppConfig::default();
//! let builder = ReportBuilder::from_config(&config.fetch)?;
//!
//! let report = builder.build(&Address::new("https://shop.example.com")).await;
//! println!("{}", report.value(ClassifierKind::PaymentProcessor));
//!
//! let runner = BatchRunner::from_config(builder, &config.batch);
//! let reports = runner.run(addresses).await?;
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod batch;
pub mod builder;
pub mod classifiers;
pub mod error;
pub mod fetcher;
pub mod report;
pub mod throttle;

// Re-export commonly used types
pub use batch::BatchRunner;
pub use builder::ReportBuilder;
pub use classifiers::AuthPath;
pub use error::{FetchError, Result, ScanError};
pub use fetcher::{FetchResult, HttpFetcher, PageFetcher, PageResponse};
pub use report::{ClassifierKind, SiteReport, Verdict};
pub use throttle::RequestThrottle;
