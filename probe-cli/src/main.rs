//! # regprobe
//!
//! Checks that the registration endpoint behaves the same through the API
//! gateway as it does on the user service directly.
//!
//! ## Commands
//!
//! - `register`: POST the test registration to every target (default)
//! - `health`: GET `/health` on every target
//!
//! ## Example
//!
//! ```bash
//! # Gateway on :3000, user service on :3001
//! regprobe
//!
//! # Also say whether both answered the same
//! regprobe register --compare
//!
//! # Point the direct probe somewhere else
//! regprobe --service-url http://localhost:4001/api/auth/register
//! ```
//!
//! Probe failures are printed, never fatal. Only bad configuration makes
//! the process exit non-zero.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use probe_core::{Config, Route};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

use commands::{health, register};

/// Log filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "regprobe=warn,regprobe_core=warn";

/// Compare the registration endpoint through the gateway and directly.
#[derive(Parser, Debug)]
#[command(name = "regprobe")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Override the gateway target URL
    #[arg(long, global = true)]
    gateway_url: Option<String>,

    /// Override the direct service target URL
    #[arg(long, global = true)]
    service_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// POST the registration payload to every target
    Register {
        /// Print whether all targets answered identically
        #[arg(long)]
        compare: bool,
    },

    /// Check the health endpoint of every target
    Health,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command.unwrap_or(Commands::Register { compare: false }) {
        Commands::Register { compare } => register::run(&config, compare).await?,
        Commands::Health => health::run(&config).await?,
    }

    Ok(())
}

/// Log to stderr; stdout carries only the report.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Defaults, then the config file, then command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(secs) = cli.timeout_secs {
        config.timeout_secs = secs;
    }
    if let Some(url) = &cli.gateway_url {
        config
            .override_url(Route::Gateway, url)
            .context("Cannot apply --gateway-url")?;
    }
    if let Some(url) = &cli.service_url {
        config
            .override_url(Route::Direct, url)
            .context("Cannot apply --service-url")?;
    }

    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}
