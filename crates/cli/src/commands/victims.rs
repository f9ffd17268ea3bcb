//! Victim profile commands.
//!
//! Responsibilities:
//! - `victims search` with the optional `--file-search` follow-up.
//! - `victims manifest`, `victims file` and `victims archive`.
//!
//! Invariants:
//! - Downloads are written atomically; an interrupted download leaves no file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use oathnet_client::models::V2VictimsData;
use oathnet_client::{Envelope, SearchMode, VictimManifest, VictimsSearchOptions};
use oathnet_config::constants::DEFAULT_PAGE_SIZE;

use super::{CommandContext, log_ids_footer, no_data_report};
use crate::formatters::{Report, output_result, write_to_file};
use crate::progress::Spinner;

const VICTIM_PRIORITY: &[&str] = &[
    "log_id",
    "device_users",
    "device_emails",
    "device_ips",
    "discord_ids",
    "hwids",
    "total_docs",
    "pwned_at",
    "indexed_at",
];

/// Manifest files listed by table output.
const MANIFEST_FILES_SHOWN: usize = 20;

#[derive(Subcommand)]
pub enum VictimsCommand {
    /// Search victim profiles
    Search {
        #[arg(short, long, default_value = "")]
        query: String,
        /// Filter by device email (repeatable)
        #[arg(long = "email", value_name = "EMAIL")]
        emails: Vec<String>,
        #[arg(long = "ip", value_name = "IP")]
        ips: Vec<String>,
        #[arg(long = "hwid", value_name = "HWID")]
        hwids: Vec<String>,
        #[arg(long = "discord-id", value_name = "ID")]
        discord_ids: Vec<String>,
        #[arg(long = "username", value_name = "USERNAME")]
        usernames: Vec<String>,
        #[arg(long = "field", value_name = "FIELD")]
        fields: Vec<String>,
        #[arg(long)]
        wildcard: bool,
        #[arg(long)]
        log_id: Option<String>,
        /// Minimum number of documents in the log
        #[arg(long)]
        total_docs_min: Option<u64>,
        #[arg(long)]
        total_docs_max: Option<u64>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
        #[arg(long)]
        cursor: Option<String>,
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
    /// Show the file tree of a victim log
    Manifest { log_id: String },
    /// Fetch one file from a victim log (printed unless -o is given)
    File {
        log_id: String,
        file_id: String,
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Download a victim log as a ZIP archive
    Archive {
        log_id: String,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

pub(crate) async fn run(command: VictimsCommand, ctx: &CommandContext<'_>) -> Result<()> {
    match command {
        VictimsCommand::Search {
            query,
            emails,
            ips,
            hwids,
            discord_ids,
            usernames,
            fields,
            wildcard,
            log_id,
            total_docs_min,
            total_docs_max,
            from,
            to,
            sort,
            page_size,
            cursor,
            search_id,
            file_search,
            file_search_mode,
            output,
        } => {
            let options = VictimsSearchOptions {
                cursor,
                page_size: Some(page_size),
                sort,
                wildcard: wildcard.then_some(true),
                log_id,
                from,
                to,
                total_docs_min,
                total_docs_max,
                search_id,
                emails,
                ips,
                hwids,
                discord_ids,
                usernames,
                fields,
            };
            let envelope = ctx
                .call(ctx.client.victims().search(&query, &options))
                .await?;
            ctx.save_raw(output.as_deref(), &envelope)?;
            ctx.render(&search_report(&envelope)?)?;

            if let (Some(pattern), Some(data)) = (file_search, envelope.data()) {
                super::file_search::follow_up(ctx, &pattern, file_search_mode, data.log_ids())
                    .await?;
            }
            Ok(())
        }
        VictimsCommand::Manifest { log_id } => {
            let envelope = ctx.call(ctx.client.victims().manifest(&log_id)).await?;
            ctx.render(&manifest_report(&envelope)?)
        }
        VictimsCommand::File {
            log_id,
            file_id,
            output,
        } => {
            let body = ctx
                .call(ctx.client.victims().file(&log_id, &file_id))
                .await?;
            match output {
                Some(path) => {
                    write_to_file(&body.bytes, &path)
                        .with_context(|| format!("Failed to save file to {}", path.display()))?;
                    ctx.notice(format!("Saved {} bytes to {}", body.bytes.len(), path.display()));
                    Ok(())
                }
                None => output_result(&body.text()),
            }
        }
        VictimsCommand::Archive { log_id, output } => {
            let spinner = Spinner::new(
                ctx.show_progress(),
                format!("Downloading archive for {log_id}"),
            );
            let path = ctx
                .call(ctx.client.victims().archive_to(&log_id, &output))
                .await?;
            spinner.finish();
            ctx.notice(format!("Downloaded to {}", path.display()));
            Ok(())
        }
    }
}

fn search_report(envelope: &Envelope<V2VictimsData>) -> Result<Report> {
    let Some(data) = envelope.data() else {
        return no_data_report(envelope, "No victims found");
    };

    let shown = data.items.len() as u64;
    let total = data.meta.as_ref().and_then(|m| m.total).unwrap_or(shown);
    let mut report = Report::new(envelope)?
        .summary("Total victims", total)
        .summary("Shown", shown)
        .records(Some("Victims"), VICTIM_PRIORITY, &data.items, "No victims found")?;

    report = log_ids_footer(
        report,
        &data.log_ids(),
        &[
            "Usage: oathnet victims manifest <log_id>",
            "       oathnet file-search search -e \"password\" --log-id <log_id>",
        ],
    );
    if let Some(cursor) = data.next_cursor.as_deref().filter(|c| !c.is_empty()) {
        report = report.footer(format!("Next cursor: {cursor}"));
    }
    Ok(report)
}

fn manifest_report(envelope: &Envelope<VictimManifest>) -> Result<Report> {
    let Some(manifest) = envelope.data() else {
        return no_data_report(envelope, "Manifest not available");
    };

    let files = manifest.victim_tree.files();
    let mut report = Report::new(envelope)?
        .summary("Log ID", &manifest.log_id)
        .summary_opt("Log name", manifest.log_name.as_deref())
        .summary("Total files", files.len())
        .summary("Total size", format!("{} bytes", manifest.victim_tree.total_size()));

    for file in files.iter().take(MANIFEST_FILES_SHOWN) {
        let size = file
            .size_bytes
            .map(|s| format!("{s} bytes"))
            .unwrap_or_else(|| "size unknown".to_string());
        report = report.footer(format!("  {} ({size}) [id: {}]", file.path, file.id));
    }
    if files.len() > MANIFEST_FILES_SHOWN {
        report = report.footer(format!(
            "  ... and {} more files",
            files.len() - MANIFEST_FILES_SHOWN
        ));
    }
    Ok(report)
}
