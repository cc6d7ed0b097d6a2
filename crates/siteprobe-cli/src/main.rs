//! `siteprobe` binary.

use anyhow::Context;
use clap::{Parser, Subcommand};
use siteprobe_cli::{Command, Dispatcher};
use siteprobe_core::{Address, AppConfig, RequesterId};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Requester identity for one-shot commands.
const LOCAL_REQUESTER: &str = "local";

#[derive(Parser)]
#[command(name = "siteprobe", version, about = "Fingerprint web pages over HTTP")]
struct Cli {
    /// Config file (defaults to the XDG config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Addresses probed at the same time during a batch
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Probe a single address
    Check { address: String },
    /// Probe every address in a .txt file (one per line)
    Batch { file: PathBuf },
    /// Generate synthetic card strings from a numeric prefix
    Gen { prefix: String, count: String },
    /// Read `<requester> /command args` events from stdin until EOF
    Listen,
}

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,siteprobe=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load().context("failed to load config")?,
    };
    let mut config = config.with_env_overrides();
    if let Some(concurrency) = cli.concurrency {
        config.batch.concurrency = concurrency;
    }
    Ok(config)
}

async fn listen(dispatcher: &Dispatcher) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        println!("{}", dispatcher.handle_event(&line).await);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    info!("Starting SiteProbe v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let dispatcher = Dispatcher::from_config(&config)?;
    let requester = RequesterId::new(LOCAL_REQUESTER);

    let command = match cli.command {
        CliCommand::Check { address } => Command::Check(Address::new(address)),
        CliCommand::Batch { file } => Command::Batch(file),
        CliCommand::Gen { prefix, count } => Command::gen(&prefix, &count)?,
        CliCommand::Listen => return listen(&dispatcher).await,
    };

    let output = dispatcher.handle(&requester, command).await?;
    println!("{output}");
    Ok(())
}
