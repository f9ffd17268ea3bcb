//! OathNet CLI - command-line interface for the OathNet breach and OSINT API.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Execute API commands via the shared client library.
//! - Display results as tables or JSON.
//!
//! Does NOT handle:
//! - Request construction or response normalization (see `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap env defaults.
//! - Errors print as `Error: <message>` on stderr and exit 1; Ctrl+C exits 130.

mod args;
mod cancellation;
mod commands;
mod config_context;
mod dispatch;
mod error;
mod formatters;
mod progress;

use std::time::Duration;

use args::Cli;
use cancellation::{CancellationToken, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use config_context::ConfigCommandContext;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use oathnet_client::metrics_exporter::MetricsExporter;
use oathnet_config::ConfigLoader;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Error: {e}");
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let _metrics_exporter = if let Some(ref bind_addr) = cli.metrics_bind {
        match MetricsExporter::install(bind_addr) {
            Ok(exporter) => {
                tracing::info!("Metrics exporter started on http://{}/metrics", bind_addr);
                Some(exporter)
            }
            Err(e) => {
                eprintln!("Error: failed to start metrics exporter: {e}");
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        }
    } else {
        None
    };

    let config_context = if cli.command.needs_api() {
        match build_config(&cli) {
            Ok(config) => ConfigCommandContext::Real(Box::new(config)),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        }
    } else {
        ConfigCommandContext::Placeholder
    };

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {e}");
            return;
        }
        cancel_clone.cancel();
    });

    let exit_code = match run_command(cli, config_context, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Environment first, then flags. Flags already carry their env fallbacks from clap.
fn build_config(cli: &Cli) -> Result<oathnet_config::Config, oathnet_config::ConfigError> {
    let mut loader = ConfigLoader::new().from_env()?;

    if let Some(key) = &cli.api_key {
        loader = loader.with_api_key(key.clone());
    }
    if let Some(url) = &cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(secs));
    }

    loader.build()
}
