//! Usage command - fetch and display usage records.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use tokentally_core::UsageSource;
use tokentally_fetch::{CancellationToken, ClientConfig};
use tracing::{debug, info};

use crate::output::{JsonFormatter, TextFormatter, UsageOutput};
use crate::{Cli, OutputFormat};

/// Arguments for the usage command.
#[derive(Args, Default)]
pub struct UsageArgs {
    /// Server base URL (e.g. http://localhost:3000).
    #[arg(long)]
    pub base_url: Option<String>,

    /// JSON file with client settings.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Attempts per fetch, including the first.
    #[arg(long)]
    pub attempts: Option<u32>,

    /// Delay before the first retry, in milliseconds.
    #[arg(long)]
    pub base_delay_ms: Option<u64>,

    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Make a single attempt.
    #[arg(long)]
    pub no_retry: bool,
}

/// Runs the usage command.
pub async fn run(args: &UsageArgs, cli: &Cli) -> Result<()> {
    let base_url = args
        .base_url
        .as_ref()
        .or(cli.base_url.as_ref())
        .context("--base-url is required")?;

    let config = resolve_config(args)?;
    debug!(config = ?config, "Resolved client settings");

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let source = config
        .build_client()?
        .bind(base_url.as_str())
        .with_cancel(cancel);

    info!(source = %source.describe(), "Fetching usage");

    let output = fetch_and_format(&source, cli).await?;
    println!("{output}");

    Ok(())
}

/// Loads the config file (if any) and applies command-line overrides.
pub fn resolve_config(args: &UsageArgs) -> Result<ClientConfig> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::load_from(path)?,
        None => ClientConfig::default(),
    };

    if let Some(attempts) = args.attempts {
        config.max_attempts = attempts;
    }
    if let Some(delay) = args.base_delay_ms {
        config.base_delay_ms = delay;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if args.no_retry {
        config.max_attempts = 1;
    }

    Ok(config)
}

/// Fetches records from `source` and renders them in the CLI's format.
pub async fn fetch_and_format<S: UsageSource>(source: &S, cli: &Cli) -> Result<String> {
    let records = source.fetch_records().await?;
    debug!(count = records.len(), "Fetched usage records");

    let described = source.describe();
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            Ok(formatter.format_records(&described, &records))
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            formatter.format(&UsageOutput::new(&described, Utc::now(), &records))
        }
    }
}

/// Cancels `token` on Ctrl-C.
fn spawn_interrupt_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupt received, cancelling fetch");
            token.cancel();
        }
    });
}

// ============================================================================
// Tests
// ============================================================================
