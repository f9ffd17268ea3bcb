//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Read connection settings from flags or `OATHNET_*` environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not validate configuration (see `oathnet_config::ConfigLoader`).
//!
//! Invariants:
//! - `-f/--format` and `--timeout` are top-level only: subcommands reuse
//!   `--format` for artifact formats and `--timeout` for job wait budgets.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::commands;
use crate::formatters::OutputFormat;

#[derive(Parser)]
#[command(name = "oathnet")]
#[command(about = "OathNet CLI - Search breach databases, stealer logs, and OSINT lookups", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  oathnet search breach -q user@example.com\n  oathnet -f json stealer search --domain example.com --has-log-id\n  oathnet victims search --email user@example.com --file-search password\n  oathnet file-search search -e 'password' --log-id LOG-A\n  oathnet export run --type docs -q gmail.com -o docs.jsonl\n  oathnet osint ip 1.1.1.1\n"
)]
pub struct Cli {
    /// OathNet API key
    #[arg(short = 'k', long, global = true, env = "OATHNET_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the OathNet API
    #[arg(long, global = true, env = "OATHNET_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "OATHNET_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Suppress progress spinners and notices.
    ///
    /// Progress indicators always write to STDERR; this flag disables them entirely.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Expose Prometheus metrics on this address (e.g. 127.0.0.1:9000)
    #[arg(long, global = true, value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search breach and stealer databases (legacy endpoints)
    Search {
        #[command(subcommand)]
        command: commands::search::SearchCommand,
    },
    /// V2 stealer search
    Stealer {
        #[command(subcommand)]
        command: commands::stealer::StealerCommand,
    },
    /// V2 victim profiles and files
    Victims {
        #[command(subcommand)]
        command: commands::victims::VictimsCommand,
    },
    /// Search the contents of victim log files
    FileSearch {
        #[command(subcommand)]
        command: commands::file_search::FileSearchCommand,
    },
    /// Export documents or victims to a file
    Export {
        #[command(subcommand)]
        command: commands::export::ExportCommand,
    },
    /// Bulk lookups over many terms
    Bulk {
        #[command(subcommand)]
        command: commands::bulk::BulkCommand,
    },
    /// OSINT lookups
    Osint {
        #[command(subcommand)]
        command: commands::osint::OsintCommand,
    },
    /// Utility commands
    Util {
        #[command(subcommand)]
        command: commands::util::UtilCommand,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Whether the command talks to the API and therefore needs an API key.
    pub fn needs_api(&self) -> bool {
        !matches!(self, Commands::Completions { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "oathnet", "osint", "ip", "1.1.1.1", "-k", "key", "--quiet",
        ])
        .unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("key"));
        assert!(cli.quiet);
        assert!(cli.command.needs_api());
    }

    #[test]
    fn test_format_is_parsed_before_subcommand() {
        let cli = Cli::try_parse_from(["oathnet", "-f", "json", "util", "health"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_export_format_does_not_clash_with_output_format() {
        let cli = Cli::try_parse_from([
            "oathnet", "export", "create", "--type", "docs", "--format", "csv",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(matches!(
            cli.command,
            Commands::Export {
                command: commands::export::ExportCommand::Create { .. }
            }
        ));
    }

    #[test]
    fn test_completions_need_no_api() {
        let cli = Cli::try_parse_from(["oathnet", "completions", "bash"]).unwrap();
        assert!(!cli.command.needs_api());
    }

    #[test]
    fn test_repeatable_filters_collect() {
        let cli = Cli::try_parse_from([
            "oathnet", "stealer", "search", "--domain", "a.com", "--domain", "b.com",
        ])
        .unwrap();
        match cli.command {
            Commands::Stealer {
                command: commands::stealer::StealerCommand::Search { domains, page_size, .. },
            } => {
                assert_eq!(domains, vec!["a.com", "b.com"]);
                assert_eq!(page_size, 25);
            }
            _ => panic!("expected stealer search"),
        }
    }
}
