//! Legacy breach/stealer search and search sessions.
//!
//! Responsibilities:
//! - `search breach`, `search stealer` and `search init`.
//! - Saving the raw envelope with `-o` before rendering.

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use oathnet_client::models::{BreachSearchData, ResponseMeta, SearchSessionData, StealerSearchData};
use oathnet_client::{BreachSearchOptions, Envelope, LegacyStealerOptions};

use super::{CommandContext, no_data_report};
use crate::formatters::Report;

const BREACH_PRIORITY: &[&str] = &[
    "id",
    "dbname",
    "email",
    "username",
    "password",
    "password_hash",
    "phone_number",
    "ip",
    "domain",
    "country",
    "city",
    "full_name",
    "first_name",
    "last_name",
    "date",
];

const LEGACY_STEALER_PRIORITY: &[&str] = &[
    "LOG", "domain", "email", "username", "password", "url", "ip", "country",
];

#[derive(Subcommand)]
pub enum SearchCommand {
    /// Search the breach database
    Breach {
        /// Search query (email, username, domain, ...)
        #[arg(short, long)]
        query: String,
        /// Pagination cursor from a previous page
        #[arg(long)]
        cursor: Option<String>,
        /// Comma-separated database names to restrict the search to
        #[arg(long)]
        dbnames: Option<String>,
        /// Search session id from `search init`
        #[arg(long)]
        search_id: Option<String>,
        /// Save the raw JSON response to a file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Search the stealer database (legacy endpoint)
    Stealer {
        #[arg(short, long)]
        query: String,
        #[arg(long)]
        cursor: Option<String>,
        #[arg(long)]
        search_id: Option<String>,
        /// Save the raw JSON response to a file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Start a search session (groups lookups under one quota charge)
    Init {
        #[arg(short, long)]
        query: String,
    },
}

pub(crate) async fn run(command: SearchCommand, ctx: &CommandContext<'_>) -> Result<()> {
    match command {
        SearchCommand::Breach {
            query,
            cursor,
            dbnames,
            search_id,
            output,
        } => {
            let options = BreachSearchOptions {
                cursor,
                dbnames,
                search_id,
            };
            let envelope = ctx
                .call(ctx.client.search().breach(&query, &options))
                .await?;
            ctx.save_raw(output.as_deref(), &envelope)?;
            ctx.render(&breach_report(&envelope)?)
        }
        SearchCommand::Stealer {
            query,
            cursor,
            search_id,
            output,
        } => {
            let options = LegacyStealerOptions {
                cursor,
                search_id,
                ..Default::default()
            };
            let envelope = ctx
                .call(ctx.client.search().stealer(&query, &options))
                .await?;
            ctx.save_raw(output.as_deref(), &envelope)?;
            ctx.render(&legacy_stealer_report(&envelope)?)
        }
        SearchCommand::Init { query } => {
            let envelope = ctx.call(ctx.client.search().init_session(&query)).await?;
            ctx.render(&session_report(&envelope)?)
        }
    }
}

fn lookups_left(meta: Option<&ResponseMeta>) -> Option<u64> {
    meta?.lookups.as_ref()?.left_today
}

fn cursor_footer(report: Report, cursor: Option<&str>) -> Report {
    match cursor.filter(|c| !c.is_empty()) {
        Some(cursor) => report
            .footer(format!("Next cursor: {cursor}"))
            .footer("Use --cursor to fetch the next page"),
        None => report,
    }
}

fn breach_report(envelope: &Envelope<BreachSearchData>) -> Result<Report> {
    let Some(data) = envelope.data() else {
        return no_data_report(envelope, "No results found");
    };

    let report = Report::new(envelope)?
        .summary("Results found", data.results_found)
        .summary("Results shown", data.results_shown)
        .summary_opt("Lookups left today", lookups_left(data.response_meta.as_ref()))
        .records(Some("Results"), BREACH_PRIORITY, &data.results, "No results found")?;
    Ok(cursor_footer(report, data.cursor.as_deref()))
}

fn legacy_stealer_report(envelope: &Envelope<StealerSearchData>) -> Result<Report> {
    let Some(data) = envelope.data() else {
        return no_data_report(envelope, "No results found");
    };

    let report = Report::new(envelope)?
        .summary("Results found", data.results_found)
        .summary("Results shown", data.results_shown)
        .records(
            Some("Results"),
            LEGACY_STEALER_PRIORITY,
            &data.results,
            "No results found",
        )?;
    Ok(cursor_footer(report, data.cursor.as_deref()))
}

fn session_report(envelope: &Envelope<SearchSessionData>) -> Result<Report> {
    let Some(data) = envelope.data() else {
        return no_data_report(envelope, "Session could not be initialized");
    };

    let user = data.user.as_ref();
    let lookups = user.and_then(|u| u.daily_lookups.as_ref());
    Ok(Report::new(envelope)?
        .summary("Session ID", &data.session.id)
        .summary("Query", &data.session.query)
        .summary_opt("Search type", data.session.search_type.as_deref())
        .summary_opt("Expires", data.session.expires_at.as_deref())
        .summary_opt("Plan", user.and_then(|u| u.plan.as_deref()))
        .summary_opt("Lookups remaining", lookups.and_then(|l| l.remaining))
        .footer(format!(
            "Pass --search-id {} to group follow-up searches",
            data.session.id
        )))
}
