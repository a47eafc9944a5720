// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `TokenTally` CLI - fetch usage records from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Fetch usage from a local server
//! tokentally --base-url http://localhost:3000
//!
//! # JSON output
//! tokentally --format json --pretty usage --base-url http://localhost:3000
//!
//! # Single attempt, 5 second timeout
//! tokentally usage --base-url http://localhost:3000 --no-retry --timeout 5
//!
//! # Show effective client settings
//! tokentally config --config tokentally.json
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tokentally_fetch::FetchError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{config, usage};

// ============================================================================
// CLI Definition
// ============================================================================

/// `TokenTally` CLI - usage records from a `TokenTally` server.
#[derive(Parser)]
#[command(name = "tokentally")]
#[command(about = "Fetch usage records from a TokenTally server")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'usage' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server base URL (e.g. http://localhost:3000).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch usage records (default if no command specified).
    #[command(visible_alias = "u")]
    Usage(usage::UsageArgs),

    /// Show effective client settings.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    #[allow(dead_code)]
    Success = 0,
    /// General error.
    Error = 1,
    /// Transport failure.
    Network = 2,
    /// Server answered with a non-200 status.
    UnexpectedStatus = 3,
    /// Server answered 200 with an unreadable body.
    Decode = 4,
    /// Interrupted by the user.
    Cancelled = 5,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<FetchError>() {
            Some(FetchError::Network(_)) => Self::Network,
            Some(FetchError::UnexpectedStatus { .. }) => Self::UnexpectedStatus,
            Some(FetchError::Decode(_)) => Self::Decode,
            Some(FetchError::Cancelled) => Self::Cancelled,
            _ => Self::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("tokentally=debug,info")
    } else {
        EnvFilter::new("tokentally=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Usage(args)) => usage::run(args, &cli).await,
        Some(Commands::Config(args)) => config::run(args, &cli),
        None => {
            // Default to usage command
            usage::run(&usage::UsageArgs::default(), &cli).await
        }
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}
