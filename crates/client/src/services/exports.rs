//! Bulk export of documents or victims, run as an async job.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use oathnet_config::constants::{DEFAULT_EXPORT_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS};

use crate::client::transport::Transport;
use crate::endpoints::RawBody;
use crate::error::Result;
use crate::jobs::{JobController, PollPolicy};
use crate::models::{Envelope, ExportJob, ExportOptions, ExportRequest, ExportType};

#[derive(Debug)]
pub struct ExportService {
    jobs: JobController<ExportJob>,
}

impl ExportService {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            jobs: JobController::new(
                transport,
                PollPolicy::from_millis(DEFAULT_POLL_INTERVAL_MS, DEFAULT_EXPORT_TIMEOUT_MS),
            ),
        }
    }

    pub fn jobs(&self) -> &JobController<ExportJob> {
        &self.jobs
    }

    /// Submit an export job.
    pub async fn create(
        &self,
        export_type: ExportType,
        options: &ExportOptions,
    ) -> Result<Envelope<ExportJob>> {
        self.jobs
            .create(&ExportRequest::new(export_type, options))
            .await
    }

    pub async fn status(&self, job_id: &str) -> Result<Envelope<ExportJob>> {
        self.jobs.status(job_id).await
    }

    pub async fn wait_for_completion(
        &self,
        job_id: &str,
        poll_interval: Option<Duration>,
        timeout: Option<Duration>,
    ) -> Result<Envelope<ExportJob>> {
        self.jobs
            .wait_for_completion(job_id, poll_interval, timeout)
            .await
    }

    /// The finished export file, in memory.
    pub async fn download(&self, job_id: &str) -> Result<RawBody> {
        self.jobs.download(job_id).await
    }

    /// Write the finished export to `path`, returning the absolute path.
    pub async fn download_to(&self, job_id: &str, path: impl AsRef<Path>) -> Result<PathBuf> {
        self.jobs.download_to(job_id, path).await
    }

    /// Create, wait for and download an export in one call.
    pub async fn export(
        &self,
        export_type: ExportType,
        output_path: impl AsRef<Path>,
        options: &ExportOptions,
        timeout: Option<Duration>,
    ) -> Result<PathBuf> {
        self.export_with_progress(export_type, output_path, options, None, timeout, |_| {})
            .await
    }

    /// Like [`Self::export`], with an explicit poll interval and progress callback.
    pub async fn export_with_progress<P: FnMut(&ExportJob)>(
        &self,
        export_type: ExportType,
        output_path: impl AsRef<Path>,
        options: &ExportOptions,
        poll_interval: Option<Duration>,
        timeout: Option<Duration>,
        on_progress: P,
    ) -> Result<PathBuf> {
        self.jobs
            .run_to_file(
                &ExportRequest::new(export_type, options),
                output_path,
                poll_interval,
                timeout,
                on_progress,
            )
            .await
    }
}
