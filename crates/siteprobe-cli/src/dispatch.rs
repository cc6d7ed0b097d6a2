//! Command dispatch: throttle gate first, then the core, then rendering.

use crate::input::{read_address_file, Command};
use crate::render;
use siteprobe_cards::CardSynthesizer;
use siteprobe_core::{AppConfig, RequesterId, Result, SiteProbeError};
use siteprobe_scanner::{BatchRunner, ReportBuilder, RequestThrottle};
use std::sync::Arc;
use std::time::Instant;

/// Owns the core components for the lifetime of the process.
pub struct Dispatcher {
    builder: ReportBuilder,
    runner: BatchRunner,
    synthesizer: CardSynthesizer,
    throttle: Arc<RequestThrottle>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        builder: ReportBuilder,
        runner: BatchRunner,
        synthesizer: CardSynthesizer,
        throttle: Arc<RequestThrottle>,
    ) -> Self {
        Self {
            builder,
            runner,
            synthesizer,
            throttle,
        }
    }

    /// Wire every component from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let builder = ReportBuilder::from_config(&config.fetch)?;
        let runner = BatchRunner::from_config(builder.clone(), &config.batch);

        Ok(Self::new(
            builder,
            runner,
            CardSynthesizer::new(&config.cards),
            Arc::new(RequestThrottle::from_config(&config.throttle)),
        ))
    }

    /// Run one command for `requester` and return the rendered reply.
    pub async fn handle(&self, requester: &RequesterId, command: Command) -> Result<String> {
        self.handle_at(requester, command, Instant::now()).await
    }

    /// [`handle`](Self::handle) with an explicit clock reading.
    pub async fn handle_at(
        &self,
        requester: &RequesterId,
        command: Command,
        now: Instant,
    ) -> Result<String> {
        self.throttle.check(requester, now)?;

        match command {
            Command::Check(address) => {
                tracing::info!("{} requested check of {}", requester, address);
                let report = self.builder.build(&address).await;
                Ok(render::report(&report))
            }
            Command::Batch(path) => {
                let addresses = read_address_file(&path).await?;
                tracing::info!(
                    "{} requested batch of {} addresses from {}",
                    requester,
                    addresses.len(),
                    path.display()
                );
                let reports = self.runner.run(addresses).await?;
                Ok(render::batch(&reports))
            }
            Command::Gen { prefix, count } => {
                tracing::info!("{} requested {} card strings", requester, count);
                let records = self.synthesizer.generate(&prefix, count)?;
                Ok(render::cards(&prefix, &records))
            }
        }
    }

    /// Handle a `listen` event line; every outcome becomes reply text.
    pub async fn handle_event(&self, line: &str) -> String {
        let outcome = match crate::input::parse_event(line) {
            Ok((requester, command)) => self.handle(&requester, command).await,
            Err(e) => Err(e),
        };

        outcome.unwrap_or_else(|e| {
            log_rejection(&e);
            render::rejection(&e)
        })
    }
}

fn log_rejection(err: &SiteProbeError) {
    match err {
        SiteProbeError::Throttled { .. } | SiteProbeError::Validation(_) => {
            tracing::debug!("Rejected request: {}", err);
        }
        _ => tracing::warn!("Request failed: {}", err),
    }
}
