//! Bulk search job commands.
//!
//! Responsibilities:
//! - `bulk create`, `bulk status`, `bulk list`, `bulk download` and the
//!   blocking `bulk run` (create, wait, download).
//!
//! Does NOT handle:
//! - Session authentication some deployments require; their errors pass through.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Subcommand};
use oathnet_client::models::JobStatus;
use oathnet_client::{BulkFormat, BulkJob, BulkJobList, BulkOptions, BulkTarget, Envelope, TrackedJob};
use oathnet_config::constants::{
    DEFAULT_BULK_LIST_PAGE, DEFAULT_BULK_LIST_PAGE_SIZE, DEFAULT_BULK_POLL_INTERVAL_MS,
    DEFAULT_BULK_TIMEOUT_MS,
};

use super::{CommandContext, no_data_report};
use crate::formatters::Report;
use crate::progress::{JobProgress, Spinner};

const JOB_PRIORITY: &[&str] = &["job_id", "id", "status", "service", "created_at", "completed_at"];

#[derive(Args, Debug, Clone)]
pub struct BulkArgs {
    /// Term to look up (repeatable)
    #[arg(long = "term", value_name = "TERM", required = true)]
    pub terms: Vec<String>,
    /// Which database to search (breach, stealer)
    #[arg(long)]
    pub service: BulkTarget,
    /// File format of the result (json, csv)
    #[arg(long, default_value = "json")]
    pub format: BulkFormat,
    /// Restrict to these database names (repeatable)
    #[arg(long = "dbname", value_name = "DBNAME")]
    pub dbnames: Vec<String>,
}

impl BulkArgs {
    fn options(&self) -> BulkOptions {
        BulkOptions {
            format: self.format,
            dbnames: self.dbnames.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum BulkCommand {
    /// Create a bulk search job and print its id
    Create {
        #[command(flatten)]
        args: BulkArgs,
    },
    /// Show a bulk job's status
    Status { job_id: String },
    /// List your bulk jobs
    List {
        #[arg(long, default_value_t = DEFAULT_BULK_LIST_PAGE)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_BULK_LIST_PAGE_SIZE)]
        page_size: u32,
    },
    /// Download a completed bulk job's result
    Download {
        job_id: String,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Create a bulk job, wait for it, and download the result
    Run {
        #[command(flatten)]
        args: BulkArgs,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
        /// Give up after this many milliseconds
        #[arg(long, default_value_t = DEFAULT_BULK_TIMEOUT_MS)]
        timeout: u64,
        #[arg(long, default_value_t = DEFAULT_BULK_POLL_INTERVAL_MS)]
        poll_interval: u64,
    },
}

pub(crate) async fn run(command: BulkCommand, ctx: &CommandContext<'_>) -> Result<()> {
    match command {
        BulkCommand::Create { args } => {
            let envelope = ctx
                .call(ctx.client.bulk().create(&args.terms, args.service, &args.options()))
                .await?;
            ctx.render(&job_report(&envelope, "Bulk job was not created")?)
        }
        BulkCommand::Status { job_id } => {
            let envelope = ctx.call(ctx.client.bulk().status(&job_id)).await?;
            ctx.render(&job_report(&envelope, "Bulk job not found")?)
        }
        BulkCommand::List { page, page_size } => {
            let list = ctx.call(ctx.client.bulk().list(page, page_size)).await?;
            ctx.render(&list_report(&list)?)
        }
        BulkCommand::Download { job_id, output } => {
            let spinner = Spinner::new(ctx.show_progress(), format!("Downloading bulk job {job_id}"));
            let path = ctx
                .call(ctx.client.bulk().download_to(&job_id, &output))
                .await?;
            spinner.finish();
            ctx.notice(format!("Downloaded to {}", path.display()));
            Ok(())
        }
        BulkCommand::Run {
            args,
            output,
            timeout,
            poll_interval,
        } => {
            let progress = JobProgress::new(
                ctx.show_progress(),
                format!("Bulk {} search over {} term(s)", args.service, args.terms.len()),
            );
            let path = ctx
                .call(ctx.client.bulk().search_with_progress(
                    &args.terms,
                    args.service,
                    &output,
                    &args.options(),
                    Some(Duration::from_millis(poll_interval)),
                    Some(Duration::from_millis(timeout)),
                    |job| progress.update(job.status().map(JobStatus::as_str), None),
                ))
                .await?;
            progress.finish();
            ctx.notice(format!("Bulk results saved to {}", path.display()));
            Ok(())
        }
    }
}

fn job_report(envelope: &Envelope<BulkJob>, empty: &str) -> Result<Report> {
    let Some(job) = envelope.data() else {
        return no_data_report(envelope, empty);
    };
    let mut report = Report::new(envelope)?
        .summary_opt("Job ID", job.job_id())
        .summary_opt("Status", job.status().map(JobStatus::as_str))
        .summary_opt("Service", job.service.as_deref())
        .summary_opt("Created", job.created_at.as_deref())
        .summary_opt("Completed", job.completed_at.as_deref());

    if let Some(job_id) = job.job_id() {
        report = if job.status() == Some(&JobStatus::Completed) {
            report.footer(format!("Use: oathnet bulk download {job_id} -o <file>"))
        } else {
            report.footer(format!("Use: oathnet bulk status {job_id}"))
        };
    }
    Ok(report)
}

fn list_report(list: &BulkJobList) -> Result<Report> {
    Report::new(list)?
        .summary_opt("Total", list.total)
        .summary_opt("Page", list.page)
        .records(Some("Jobs"), JOB_PRIORITY, &list.jobs, "No bulk jobs found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::{Formatter, TableFormatter};
    use serde_json::json;

    #[test]
    fn test_job_report_uses_id_alias() {
        let envelope: Envelope<BulkJob> =
            Envelope::from_value(json!({"id": "b_42", "status": "COMPLETED", "service": "breach"}))
                .unwrap();
        let output = TableFormatter
            .format_report(&job_report(&envelope, "missing").unwrap())
            .unwrap();
        assert!(output.contains("Job ID: b_42\nStatus: completed\nService: breach\n"));
        assert!(output.contains("oathnet bulk download b_42 -o <file>"));
    }

    #[test]
    fn test_list_report_renders_jobs() {
        let list: BulkJobList = serde_json::from_value(json!({
            "results": [{"job_id": "b_1", "status": "processing"}],
            "total": 1,
            "page": 1
        }))
        .unwrap();
        let output = TableFormatter
            .format_report(&list_report(&list).unwrap())
            .unwrap();
        assert!(output.contains("Total: 1\nPage: 1\n"));
        assert!(output.contains("  job_id: b_1\n  status: running\n"));
    }
}
