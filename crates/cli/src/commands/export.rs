//! Export job commands.
//!
//! Responsibilities:
//! - `export create`, `export status`, `export download` and the blocking
//!   `export run` (create, wait, download).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Subcommand};
use oathnet_client::models::JobStatus;
use oathnet_client::{Envelope, ExportFormat, ExportJob, ExportOptions, ExportType};
use oathnet_config::constants::{DEFAULT_EXPORT_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS};
use serde_json::{Map, Value};

use super::{CommandContext, no_data_report};
use crate::formatters::Report;
use crate::progress::{JobProgress, Spinner};

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// What to export (docs, victims)
    #[arg(long = "type", value_name = "TYPE")]
    pub export_type: ExportType,
    /// File format of the artifact (jsonl, csv)
    #[arg(long, default_value = "jsonl")]
    pub format: ExportFormat,
    /// Maximum number of records
    #[arg(long)]
    pub limit: Option<u64>,
    /// Search query restricting the exported records
    #[arg(short, long)]
    pub query: Option<String>,
    /// Only export these fields (repeatable)
    #[arg(long = "field", value_name = "FIELD")]
    pub fields: Vec<String>,
}

impl ExportArgs {
    fn options(&self) -> ExportOptions {
        let search = self.query.as_ref().map(|q| {
            let mut search = Map::new();
            search.insert("query".to_string(), Value::String(q.clone()));
            search
        });
        ExportOptions {
            format: self.format,
            limit: self.limit,
            fields: self.fields.clone(),
            search,
        }
    }
}

#[derive(Subcommand)]
pub enum ExportCommand {
    /// Create an export job and print its id
    Create {
        #[command(flatten)]
        args: ExportArgs,
    },
    /// Show an export job's status
    Status { job_id: String },
    /// Download a completed export
    Download {
        job_id: String,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Create an export, wait for it, and download the result
    Run {
        #[command(flatten)]
        args: ExportArgs,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
        /// Give up after this many milliseconds
        #[arg(long, default_value_t = DEFAULT_EXPORT_TIMEOUT_MS)]
        timeout: u64,
        #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
        poll_interval: u64,
    },
}

pub(crate) async fn run(command: ExportCommand, ctx: &CommandContext<'_>) -> Result<()> {
    match command {
        ExportCommand::Create { args } => {
            let envelope = ctx
                .call(ctx.client.exports().create(args.export_type, &args.options()))
                .await?;
            ctx.render(&created_report(&envelope)?)
        }
        ExportCommand::Status { job_id } => {
            let envelope = ctx.call(ctx.client.exports().status(&job_id)).await?;
            ctx.render(&status_report(&envelope)?)
        }
        ExportCommand::Download { job_id, output } => {
            let spinner = Spinner::new(ctx.show_progress(), format!("Downloading export {job_id}"));
            let path = ctx
                .call(ctx.client.exports().download_to(&job_id, &output))
                .await?;
            spinner.finish();
            ctx.notice(format!("Downloaded to {}", path.display()));
            Ok(())
        }
        ExportCommand::Run {
            args,
            output,
            timeout,
            poll_interval,
        } => {
            let progress = JobProgress::new(
                ctx.show_progress(),
                format!("Exporting {}", args.export_type),
            );
            let path = ctx
                .call(ctx.client.exports().export_with_progress(
                    args.export_type,
                    &output,
                    &args.options(),
                    Some(Duration::from_millis(poll_interval)),
                    Some(Duration::from_millis(timeout)),
                    |job| {
                        progress.update(
                            job.status.as_ref().map(JobStatus::as_str),
                            job.progress.as_ref().and_then(|p| p.percent),
                        )
                    },
                ))
                .await?;
            progress.finish();
            ctx.notice(format!("Export saved to {}", path.display()));
            Ok(())
        }
    }
}

fn created_report(envelope: &Envelope<ExportJob>) -> Result<Report> {
    let Some(job) = envelope.data() else {
        return no_data_report(envelope, "Export job was not created");
    };
    let job_id = job.job_id.as_deref().unwrap_or_default();
    Ok(Report::new(envelope)?
        .summary("Job ID", job_id)
        .summary_opt("Status", job.status.as_ref().map(JobStatus::as_str))
        .footer(format!("Use: oathnet export status {job_id}")))
}

fn status_report(envelope: &Envelope<ExportJob>) -> Result<Report> {
    let Some(job) = envelope.data() else {
        return no_data_report(envelope, "Export job not found");
    };

    let mut report = Report::new(envelope)?
        .summary_opt("Job ID", job.job_id.as_deref())
        .summary_opt("Status", job.status.as_ref().map(JobStatus::as_str));

    if let Some(progress) = &job.progress {
        report = report.summary_opt("Progress", progress.percent.map(|p| format!("{p:.1}%")));
        if let Some(done) = progress.records_done {
            let total = progress
                .records_total
                .map(|t| t.to_string())
                .unwrap_or_else(|| "?".to_string());
            report = report.summary("Records", format!("{done}/{total}"));
        }
    }

    if job.status == Some(JobStatus::Completed)
        && let Some(result) = &job.result
    {
        report = report
            .summary_opt("File", result.file_name.as_deref())
            .summary_opt("Size", result.file_size.map(|s| format!("{s} bytes")))
            .summary_opt("Records exported", result.records)
            .summary_opt("Expires", result.expires_at.as_deref());
        if let Some(job_id) = job.job_id.as_deref() {
            report = report.footer(format!("Use: oathnet export download {job_id} -o <file>"));
        }
    }
    Ok(report)
}
