//! File-search job commands.
//!
//! Responsibilities:
//! - `file-search create`, `file-search status` and the blocking `file-search search`.
//! - The follow-up search that `stealer search` and `victims search` run over
//!   the log ids they returned (`--file-search PATTERN`).
//!
//! Does NOT handle:
//! - Poll timing (see `oathnet_client::jobs`).

use std::time::Duration;

use anyhow::Result;
use clap::{Args, Subcommand};
use oathnet_client::models::{FileSearchMatch, JobStatus};
use oathnet_client::{Envelope, FileSearchJob, FileSearchOptions, SearchMode};
use oathnet_config::constants::{
    DEFAULT_CONTEXT_LINES, DEFAULT_FILE_SEARCH_TIMEOUT_MS, DEFAULT_MAX_MATCHES,
    DEFAULT_POLL_INTERVAL_MS,
};
use serde_json::{Value, json};

use super::{CommandContext, no_data_report};
use crate::cancellation::is_cancelled_error;
use crate::formatters::{OutputFormat, Report};
use crate::progress::JobProgress;

/// Log ids passed to a follow-up search at most.
const FOLLOW_UP_MAX_LOG_IDS: usize = 10;
const FOLLOW_UP_MAX_MATCHES: u32 = 50;
/// Matches printed by table output.
const MATCHES_SHOWN: usize = 20;
const MATCH_TEXT_PREVIEW: usize = 100;

const MATCH_PRIORITY: &[&str] = &["file_name", "log_id", "path", "line", "match"];

#[derive(Args, Debug, Clone)]
pub struct FileSearchArgs {
    /// Expression to look for in victim files
    #[arg(short, long)]
    pub expression: String,
    /// How the expression is interpreted (literal, regex, wildcard)
    #[arg(long, default_value = "literal")]
    pub mode: SearchMode,
    #[arg(long, default_value_t = DEFAULT_MAX_MATCHES)]
    pub max_matches: u32,
    /// Restrict the search to these victim logs (repeatable)
    #[arg(long = "log-id", value_name = "LOG_ID")]
    pub log_ids: Vec<String>,
    /// Only scan files whose name matches this glob
    #[arg(long)]
    pub file_pattern: Option<String>,
    #[arg(long)]
    pub case_sensitive: bool,
    /// Lines of context around each match
    #[arg(long, default_value_t = DEFAULT_CONTEXT_LINES)]
    pub context_lines: u32,
}

impl FileSearchArgs {
    fn options(&self) -> FileSearchOptions {
        FileSearchOptions {
            search_mode: self.mode,
            case_sensitive: self.case_sensitive,
            context_lines: self.context_lines,
            max_matches: self.max_matches,
            log_ids: self.log_ids.clone(),
            file_pattern: self.file_pattern.clone(),
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
pub enum FileSearchCommand {
    /// Create a file-search job and print its id
    Create {
        #[command(flatten)]
        args: FileSearchArgs,
    },
    /// Show a file-search job's status and matches
    Status { job_id: String },
    /// Create a file-search job and wait for its results
    Search {
        #[command(flatten)]
        args: FileSearchArgs,
        /// Give up after this many milliseconds
        #[arg(long, default_value_t = DEFAULT_FILE_SEARCH_TIMEOUT_MS)]
        timeout: u64,
        /// Milliseconds between status polls when the server gives no hint
        #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
        poll_interval: u64,
    },
}

pub(crate) async fn run(command: FileSearchCommand, ctx: &CommandContext<'_>) -> Result<()> {
    match command {
        FileSearchCommand::Create { args } => {
            let envelope = ctx
                .call(ctx.client.file_search().create(&args.expression, &args.options()))
                .await?;
            ctx.render(&created_report(&envelope)?)
        }
        FileSearchCommand::Status { job_id } => {
            let envelope = ctx.call(ctx.client.file_search().status(&job_id)).await?;
            ctx.render(&job_report(&envelope)?)
        }
        FileSearchCommand::Search {
            args,
            timeout,
            poll_interval,
        } => {
            let progress = JobProgress::new(
                ctx.show_progress(),
                format!("Searching files for '{}'", args.expression),
            );
            let envelope = ctx
                .call(ctx.client.file_search().search_with_progress(
                    &args.expression,
                    &args.options(),
                    Some(Duration::from_millis(poll_interval)),
                    Some(Duration::from_millis(timeout)),
                    |job| update_progress(&progress, job),
                ))
                .await?;
            progress.finish();
            ctx.render(&job_report(&envelope)?)
        }
    }
}

fn update_progress(progress: &JobProgress, job: &FileSearchJob) {
    progress.update(
        job.status.as_ref().map(JobStatus::as_str),
        job.progress.as_ref().and_then(|p| p.percent),
    );
}

/// Run a file-search over log ids returned by a search command.
///
/// Only table output runs the follow-up. Failures other than cancellation
/// are printed and do not fail the surrounding command.
pub(crate) async fn follow_up(
    ctx: &CommandContext<'_>,
    pattern: &str,
    mode: SearchMode,
    log_ids: Vec<String>,
) -> Result<()> {
    if ctx.format != OutputFormat::Table || log_ids.is_empty() {
        return Ok(());
    }

    let options = FileSearchOptions {
        search_mode: mode,
        max_matches: FOLLOW_UP_MAX_MATCHES,
        log_ids: log_ids.into_iter().take(FOLLOW_UP_MAX_LOG_IDS).collect(),
        ..Default::default()
    };

    let progress = JobProgress::new(
        ctx.show_progress(),
        format!("Searching {} log(s) for '{pattern}'", options.log_ids.len()),
    );
    let result = ctx
        .call(ctx.client.file_search().search_with_progress(
            pattern,
            &options,
            None,
            None,
            |job| update_progress(&progress, job),
        ))
        .await;
    progress.finish();

    match result {
        Ok(envelope) => {
            let report = match envelope.data() {
                Some(job) => matches_report_into(
                    Report::new(&envelope)?.summary("File search", pattern),
                    &job.matches,
                    "No file matches found",
                )?,
                None => no_data_report(&envelope, "No file matches found")?,
            };
            ctx.render(&report)
        }
        Err(e) if is_cancelled_error(&e) => Err(e),
        Err(e) => {
            eprintln!("File search error: {e:#}");
            Ok(())
        }
    }
}

fn created_report(envelope: &Envelope<FileSearchJob>) -> Result<Report> {
    let Some(job) = envelope.data() else {
        return no_data_report(envelope, "File search job was not created");
    };
    let job_id = job.job_id.as_deref().unwrap_or_default();
    Ok(Report::new(envelope)?
        .summary("Job ID", job_id)
        .summary_opt("Status", job.status.as_ref().map(JobStatus::as_str))
        .footer(format!("Use: oathnet file-search status {job_id}")))
}

fn job_report(envelope: &Envelope<FileSearchJob>) -> Result<Report> {
    let Some(job) = envelope.data() else {
        return no_data_report(envelope, "File search job not found");
    };

    let mut report = Report::new(envelope)?
        .summary_opt("Job ID", job.job_id.as_deref())
        .summary_opt("Status", job.status.as_ref().map(JobStatus::as_str));

    if let Some(summary) = &job.summary {
        if let (Some(scanned), Some(total)) = (summary.files_scanned, summary.files_total) {
            report = report.summary("Files scanned", format!("{scanned}/{total}"));
        }
        report = report
            .summary_opt("Files matched", summary.files_matched)
            .summary_opt("Total matches", summary.matches);
        if summary.truncated == Some(true) {
            report = report.summary("Truncated", "yes (raise --max-matches)");
        }
    } else if let Some(progress) = job.progress.as_ref().and_then(|p| p.percent) {
        report = report.summary("Progress", format!("{progress:.1}%"));
    }

    let is_done = job.status.as_ref().is_some_and(JobStatus::is_terminal);
    if !is_done && job.matches.is_empty() {
        return Ok(report);
    }
    let empty = if is_done { "No matches" } else { "No matches yet" };
    matches_report_into(report, &job.matches, empty)
}

fn matches_report_into(report: Report, matches: &[FileSearchMatch], empty: &str) -> Result<Report> {
    let shown: Vec<Value> = matches.iter().take(MATCHES_SHOWN).map(match_record).collect();
    let mut report = report.records(Some("Matches"), MATCH_PRIORITY, &shown, empty)?;
    if matches.len() > MATCHES_SHOWN {
        report = report.footer(format!(
            "... and {} more matches (use -f json for all)",
            matches.len() - MATCHES_SHOWN
        ));
    }
    Ok(report)
}

/// Condensed view of a match for table output.
fn match_record(m: &FileSearchMatch) -> Value {
    json!({
        "file_name": m.file_name,
        "log_id": m.log_id,
        "path": m.relative_path,
        "line": m.line_number,
        "match": m.match_text.as_deref().map(preview),
    })
}

fn preview(text: &str) -> String {
    if text.chars().count() <= MATCH_TEXT_PREVIEW {
        return text.to_string();
    }
    let mut short: String = text.chars().take(MATCH_TEXT_PREVIEW).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::{Formatter, TableFormatter};

    fn completed(matches: usize) -> Envelope<FileSearchJob> {
        let matches: Vec<Value> = (0..matches)
            .map(|i| {
                json!({
                    "log_id": "LOG-A",
                    "file_id": format!("f{i}"),
                    "file_name": "Passwords.txt",
                    "relative_path": "Passwords.txt",
                    "line_number": i,
                    "match_text": "user:secret"
                })
            })
            .collect();
        let count = matches.len();
        Envelope::from_value(json!({
            "success": true,
            "data": {
                "job_id": "fs_1",
                "status": "completed",
                "summary": {"files_total": 4, "files_scanned": 4, "files_matched": 1, "matches": count},
                "matches": matches
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_job_report_lists_matches_with_summary() {
        let output = TableFormatter
            .format_report(&job_report(&completed(1)).unwrap())
            .unwrap();
        assert!(output.contains("Status: completed\n"));
        assert!(output.contains("Files scanned: 4/4\n"));
        assert!(output.contains("  file_name: Passwords.txt\n  log_id: LOG-A\n"));
        assert!(output.contains("  match: user:secret\n"));
    }

    #[test]
    fn test_job_report_caps_matches_shown() {
        let report = job_report(&completed(25)).unwrap();
        assert_eq!(report.sections[0].records.len(), MATCHES_SHOWN);
        assert_eq!(
            report.footer,
            vec!["... and 5 more matches (use -f json for all)"]
        );
    }

    #[test]
    fn test_running_job_without_matches_has_no_section() {
        let envelope: Envelope<FileSearchJob> = Envelope::from_value(json!({
            "success": true,
            "data": {"job_id": "fs_1", "status": "running", "progress": {"percent": 12.5}}
        }))
        .unwrap();
        let report = job_report(&envelope).unwrap();
        assert!(report.sections.is_empty());
        assert!(report.summary.contains(&("Progress".to_string(), "12.5%".to_string())));
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let long = "x".repeat(150);
        let short = preview(&long);
        assert_eq!(short.len(), MATCH_TEXT_PREVIEW + 3);
        assert!(short.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }
}
