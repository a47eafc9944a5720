//! Config command - show effective client settings.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tokentally_fetch::ClientConfig;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    /// JSON file with client settings.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    let config = match &args.config {
        Some(path) => ClientConfig::load_from(path)?,
        None => ClientConfig::default(),
    };

    println!("{}", render(&config, cli)?);
    Ok(())
}

fn render(config: &ClientConfig, cli: &Cli) -> Result<String> {
    if cli.format == OutputFormat::Json {
        return JsonFormatter::new(cli.pretty).format(config);
    }

    let lines = [
        format!("Attempts:    {}", config.max_attempts.max(1)),
        format!("Base delay:  {}ms", config.base_delay_ms),
        format!("Max delay:   {}ms", config.max_delay_ms),
        format!("Timeout:     {}s", config.timeout_secs),
    ];
    Ok(lines.join("\n"))
}
