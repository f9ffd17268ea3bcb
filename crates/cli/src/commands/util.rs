//! Utility commands: database name autocomplete, service health, analytics.

use anyhow::Result;
use clap::Subcommand;
use oathnet_client::models::V2AnalyticsData;
use oathnet_client::{AnalyticsFormat, AnalyticsReport, Envelope, V2HealthData};

use super::{CommandContext, no_data_report};
use crate::formatters::{OutputFormat, Report, output_result};

const DAY_PRIORITY: &[&str] = &["date", "docs", "victims"];

#[derive(Subcommand)]
pub enum UtilCommand {
    /// Autocomplete breach database names
    Dbnames {
        #[arg(short, long)]
        query: String,
    },
    /// Service and dependency health
    Health,
    /// Index statistics
    Analytics {
        /// Print the HTML dashboard instead of statistics
        #[arg(long)]
        html: bool,
    },
}

pub(crate) async fn run(command: UtilCommand, ctx: &CommandContext<'_>) -> Result<()> {
    match command {
        UtilCommand::Dbnames { query } => {
            let names = ctx
                .call(ctx.client.utility().dbname_autocomplete(&query))
                .await?;
            ctx.render(&dbnames_report(&names)?)
        }
        UtilCommand::Health => {
            let envelope = ctx.call(ctx.client.utility().health()).await?;
            ctx.render(&health_report(&envelope)?)
        }
        UtilCommand::Analytics { html } => {
            let format = if html {
                AnalyticsFormat::Html
            } else {
                AnalyticsFormat::Json
            };
            match ctx.call(ctx.client.utility().analytics(format)).await? {
                AnalyticsReport::Stats(envelope) => ctx.render(&analytics_report(&envelope)?),
                AnalyticsReport::Html(page) if ctx.format == OutputFormat::Json => {
                    ctx.render(&Report::new(serde_json::json!({ "html": page }))?)
                }
                AnalyticsReport::Html(page) => output_result(&page),
            }
        }
    }
}

fn dbnames_report(names: &[String]) -> Result<Report> {
    let mut report = Report::new(names)?.summary("Database names", names.len());
    for name in names {
        report = report.footer(format!("  {name}"));
    }
    Ok(report)
}

fn health_report(envelope: &Envelope<V2HealthData>) -> Result<Report> {
    let Some(health) = envelope.data() else {
        return no_data_report(envelope, "Health unavailable");
    };
    let status = serde_json::to_value(health.status)?;
    let mut report = Report::new(envelope)?
        .summary("Status", status.as_str().unwrap_or("unknown"))
        .summary_opt(
            "Checked at",
            Some(health.checked_at_utc.as_str()).filter(|s| !s.is_empty()),
        );
    for (name, dependency) in &health.dependencies {
        report = report.footer(format!("  {name}: {}", dependency.status));
    }
    Ok(report)
}

fn analytics_report(envelope: &Envelope<V2AnalyticsData>) -> Result<Report> {
    let Some(stats) = envelope.data() else {
        return no_data_report(envelope, "Analytics unavailable");
    };
    Report::new(envelope)?
        .summary("Total documents", stats.totals.docs)
        .summary("Total victims", stats.totals.victims)
        .summary("Documents (past hour)", stats.past_hour.docs)
        .summary("Victims (past hour)", stats.past_hour.victims)
        .summary_opt(
            "Updated",
            Some(stats.updated_at.as_str()).filter(|s| !s.is_empty()),
        )
        .records(
            Some("Last 7 days"),
            DAY_PRIORITY,
            &stats.last_7_days,
            "No daily statistics",
        )
}
