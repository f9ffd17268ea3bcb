//! CLI command implementations.
//!
//! Each submodule owns one top-level subcommand: its clap `Subcommand` enum and
//! a `run` function that calls the client and renders a [`Report`].
//!
//! Does NOT handle:
//! - Argument routing (see `dispatch`).
//! - Configuration loading (see `main()`).

pub mod bulk;
pub mod completions;
pub mod export;
pub mod file_search;
pub mod osint;
pub mod search;
pub mod stealer;
pub mod util;
pub mod victims;

use std::future::Future;
use std::path::Path;

use anyhow::{Context, Result};
use oathnet_client::{Envelope, MetricsCollector, OathNetClient};
use oathnet_config::Config;
use serde::Serialize;

use crate::cancellation::CancellationToken;
use crate::formatters::{OutputFormat, Report, get_formatter, output_result, write_json_file};

/// Build the API client from resolved configuration.
///
/// Metrics are recorded only when an exporter is installed.
pub(crate) fn build_client(config: &Config, metrics: bool) -> Result<OathNetClient> {
    let collector = if metrics {
        MetricsCollector::new()
    } else {
        MetricsCollector::disabled()
    };

    OathNetClient::builder()
        .from_config(config)
        .metrics(collector)
        .build()
        .context("Failed to build API client")
}

/// Shared state for one command invocation.
pub(crate) struct CommandContext<'a> {
    pub client: OathNetClient,
    pub format: OutputFormat,
    pub quiet: bool,
    pub cancel: &'a CancellationToken,
}

impl CommandContext<'_> {
    /// Spinners only make sense for humans reading a table.
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Table
    }

    /// Run an API call, aborting if Ctrl+C arrives first.
    pub async fn call<T>(
        &self,
        fut: impl Future<Output = oathnet_client::Result<T>>,
    ) -> Result<T> {
        self.cancel.guard(fut).await
    }

    pub fn render(&self, report: &Report) -> Result<()> {
        let output = get_formatter(self.format).format_report(report)?;
        output_result(&output)
    }

    /// Persist the raw response when `-o/--output` was given.
    pub fn save_raw(&self, path: Option<&Path>, value: &impl Serialize) -> Result<()> {
        match path {
            Some(path) => write_json_file(value, path),
            None => Ok(()),
        }
    }

    /// Print a confirmation line on stderr unless `--quiet`.
    pub fn notice(&self, message: impl AsRef<str>) {
        if !self.quiet {
            eprintln!("{}", message.as_ref());
        }
    }
}

/// Report for an envelope that carried no usable data.
///
/// The server's message is preferred over the generic `empty` text.
pub(crate) fn no_data_report<T: Serialize>(envelope: &Envelope<T>, empty: &str) -> Result<Report> {
    let message = envelope
        .message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(empty);
    Ok(Report::new(envelope)?.footer(message))
}

/// List the log ids a search returned, for use with follow-up commands.
pub(crate) fn log_ids_footer(mut report: Report, log_ids: &[String], usage: &[&str]) -> Report {
    if log_ids.is_empty() {
        return report;
    }
    report = report.footer("Log IDs:");
    for id in log_ids {
        report = report.footer(format!("  {id}"));
    }
    for line in usage {
        report = report.footer(*line);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_report_prefers_server_message() {
        let env: Envelope<u32> = Envelope {
            success: false,
            message: Some("Daily limit reached".to_string()),
            data: Some(1),
        };
        let report = no_data_report(&env, "No results found").unwrap();
        assert_eq!(report.footer, vec!["Daily limit reached"]);
        assert_eq!(report.raw["success"], false);
    }

    #[test]
    fn test_no_data_report_falls_back_to_empty_text() {
        let env: Envelope<u32> = Envelope {
            success: true,
            message: Some("  ".to_string()),
            data: None,
        };
        let report = no_data_report(&env, "No results found").unwrap();
        assert_eq!(report.footer, vec!["No results found"]);
    }
}
