//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the command handlers.
//! - Build the API client and command context for commands that need one.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()` and `config_context`).
//!
//! Invariants:
//! - Every API command receives the same cancellation token.
//! - `completions` never touches configuration.

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands::{self, CommandContext, build_client};
use crate::config_context::ConfigCommandContext;

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(
    cli: Cli,
    config: ConfigCommandContext,
    cancel_token: &CancellationToken,
) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        return commands::completions::run(shell);
    }

    let config = config.into_real_config()?;
    let ctx = CommandContext {
        client: build_client(&config, cli.metrics_bind.is_some())?,
        format: cli.format,
        quiet: cli.quiet,
        cancel: cancel_token,
    };

    match cli.command {
        Commands::Search { command } => commands::search::run(command, &ctx).await,
        Commands::Stealer { command } => commands::stealer::run(command, &ctx).await,
        Commands::Victims { command } => commands::victims::run(command, &ctx).await,
        Commands::FileSearch { command } => commands::file_search::run(command, &ctx).await,
        Commands::Export { command } => commands::export::run(command, &ctx).await,
        Commands::Bulk { command } => commands::bulk::run(command, &ctx).await,
        Commands::Osint { command } => commands::osint::run(command, &ctx).await,
        Commands::Util { command } => commands::util::run(command, &ctx).await,
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}
