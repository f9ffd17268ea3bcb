//! V2 stealer search commands.
//!
//! Responsibilities:
//! - `stealer search` with every filter the endpoint accepts.
//! - `stealer subdomain`.
//! - The optional `--file-search` follow-up over returned log ids.

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use oathnet_client::models::{SubdomainData, V2StealerData};
use oathnet_client::{Envelope, SearchMode, StealerSearchOptions};
use oathnet_config::constants::DEFAULT_PAGE_SIZE;

use super::{CommandContext, log_ids_footer, no_data_report};
use crate::formatters::Report;

const STEALER_PRIORITY: &[&str] = &[
    "id",
    "log_id",
    "url",
    "username",
    "password",
    "email",
    "domain",
    "subdomain",
    "path",
    "log",
    "pwned_at",
    "indexed_at",
];

#[derive(Subcommand)]
pub enum StealerCommand {
    /// Search stealer credentials
    Search {
        /// Free-text query
        #[arg(short, long, default_value = "")]
        query: String,
        /// Filter by domain (repeatable)
        #[arg(long = "domain", value_name = "DOMAIN")]
        domains: Vec<String>,
        #[arg(long = "subdomain", value_name = "SUBDOMAIN")]
        subdomains: Vec<String>,
        #[arg(long = "username", value_name = "USERNAME")]
        usernames: Vec<String>,
        #[arg(long = "password", value_name = "PASSWORD")]
        passwords: Vec<String>,
        #[arg(long = "path", value_name = "PATH")]
        paths: Vec<String>,
        /// Only return these fields (repeatable)
        #[arg(long = "field", value_name = "FIELD")]
        fields: Vec<String>,
        /// Treat the query as a wildcard pattern
        #[arg(long)]
        wildcard: bool,
        /// Only results that carry a log id
        #[arg(long)]
        has_log_id: bool,
        #[arg(long)]
        log_id: Option<String>,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
        #[arg(long)]
        cursor: Option<String>,
        #[arg(long)]
        sort: Option<String>,
        /// Earliest pwned date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Latest pwned date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        search_id: Option<String>,
        /// Search the returned logs' files for this pattern
        #[arg(long, value_name = "PATTERN")]
        file_search: Option<String>,
        #[arg(long, default_value = "literal")]
        file_search_mode: SearchMode,
        /// Save the raw JSON response to a file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// List subdomains seen in stealer data for a domain
    Subdomain {
        #[arg(short, long)]
        domain: String,
        /// Narrow the subdomains with a query
        #[arg(short, long)]
        query: Option<String>,
    },
}

pub(crate) async fn run(command: StealerCommand, ctx: &CommandContext<'_>) -> Result<()> {
    match command {
        StealerCommand::Search {
            query,
            domains,
            subdomains,
            usernames,
            passwords,
            paths,
            fields,
            wildcard,
            has_log_id,
            log_id,
            page_size,
            cursor,
            sort,
            from,
            to,
            search_id,
            file_search,
            file_search_mode,
            output,
        } => {
            let options = StealerSearchOptions {
                cursor,
                page_size: Some(page_size),
                sort,
                wildcard: wildcard.then_some(true),
                log_id,
                has_log_id: has_log_id.then_some(true),
                from,
                to,
                search_id,
                domains,
                subdomains,
                usernames,
                passwords,
                paths,
                fields,
            };
            let envelope = ctx
                .call(ctx.client.stealer().search(&query, &options))
                .await?;
            ctx.save_raw(output.as_deref(), &envelope)?;
            ctx.render(&search_report(&envelope)?)?;

            if let (Some(pattern), Some(data)) = (file_search, envelope.data()) {
                super::file_search::follow_up(ctx, &pattern, file_search_mode, data.log_ids()).await?;
            }
            Ok(())
        }
        StealerCommand::Subdomain { domain, query } => {
            let envelope = ctx
                .call(ctx.client.stealer().subdomain(&domain, query.as_deref()))
                .await?;
            ctx.render(&subdomain_report(&envelope)?)
        }
    }
}

fn search_report(envelope: &Envelope<V2StealerData>) -> Result<Report> {
    let Some(data) = envelope.data() else {
        return no_data_report(envelope, "No results found");
    };

    let shown = data.items.len() as u64;
    let total = data.meta.as_ref().and_then(|m| m.total).unwrap_or(shown);
    let mut report = Report::new(envelope)?
        .summary("Total results", total)
        .summary("Shown", shown)
        .records(Some("Results"), STEALER_PRIORITY, &data.items, "No results found")?;

    report = log_ids_footer(
        report,
        &data.log_ids(),
        &["Use with: oathnet victims manifest <log_id> or --file-search <pattern>"],
    );
    if let Some(cursor) = data.next_cursor.as_deref().filter(|c| !c.is_empty()) {
        report = report.footer(format!("Next cursor: {cursor}"));
    }
    Ok(report)
}

fn subdomain_report(envelope: &Envelope<SubdomainData>) -> Result<Report> {
    let Some(data) = envelope.data() else {
        return no_data_report(envelope, "No subdomains found");
    };

    let mut report = Report::new(envelope)?
        .summary("Domain", &data.domain)
        .summary("Subdomains found", data.count);
    for subdomain in &data.subdomains {
        report = report.footer(format!("  {subdomain}"));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::{Formatter, TableFormatter};
    use serde_json::json;

    #[test]
    fn test_search_report_lists_distinct_log_ids() {
        let envelope: Envelope<V2StealerData> = Envelope::from_value(json!({
            "success": true,
            "data": {
                "items": [
                    {"id": "1", "log_id": "LOG-A", "url": "https://a.example", "domain": ["a.example"]},
                    {"id": "2", "log_id": "LOG-A"},
                    {"id": "3", "log_id": "LOG-B"}
                ],
                "meta": {"total": 120},
                "next_cursor": "n-2"
            }
        }))
        .unwrap();

        let output = TableFormatter
            .format_report(&search_report(&envelope).unwrap())
            .unwrap();
        assert!(output.contains("Total results: 120\nShown: 3\n"));
        assert!(output.contains("Log IDs:\n  LOG-A\n  LOG-B\n"));
        assert!(output.contains("Next cursor: n-2"));
    }

    #[test]
    fn test_subdomain_report() {
        let envelope = Envelope::ok(SubdomainData {
            subdomains: vec!["api.x.io".to_string(), "mail.x.io".to_string()],
            count: 2,
            domain: "x.io".to_string(),
            response_meta: None,
        });
        let output = TableFormatter
            .format_report(&subdomain_report(&envelope).unwrap())
            .unwrap();
        assert!(output.starts_with("Domain: x.io\nSubdomains found: 2\n"));
        assert!(output.contains("  api.x.io\n  mail.x.io\n"));
    }
}
