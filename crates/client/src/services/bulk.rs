//! Bulk breach/stealer lookups over many terms, run as an async job.
//!
//! The service may require session authentication on some deployments; its
//! errors are passed through unchanged.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use oathnet_config::constants::{DEFAULT_BULK_POLL_INTERVAL_MS, DEFAULT_BULK_TIMEOUT_MS};

use crate::client::transport::Transport;
use crate::endpoints::{QueryParams, RawBody};
use crate::error::Result;
use crate::jobs::{JobController, PollPolicy};
use crate::models::{BulkJob, BulkJobList, BulkOptions, BulkRequest, BulkTarget, Envelope};

#[derive(Debug)]
pub struct BulkService {
    transport: Arc<Transport>,
    jobs: JobController<BulkJob>,
}

impl BulkService {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            jobs: JobController::new(
                Arc::clone(&transport),
                PollPolicy::from_millis(DEFAULT_BULK_POLL_INTERVAL_MS, DEFAULT_BULK_TIMEOUT_MS),
            ),
            transport,
        }
    }

    pub fn jobs(&self) -> &JobController<BulkJob> {
        &self.jobs
    }

    /// Submit a bulk job for `terms`.
    pub async fn create(
        &self,
        terms: &[String],
        target: BulkTarget,
        options: &BulkOptions,
    ) -> Result<Envelope<BulkJob>> {
        self.jobs.create(&request(terms, target, options)).await
    }

    pub async fn status(&self, job_id: &str) -> Result<Envelope<BulkJob>> {
        self.jobs.status(job_id).await
    }

    /// One page of the caller's bulk jobs.
    pub async fn list(&self, page: u32, page_size: u32) -> Result<BulkJobList> {
        let mut params = QueryParams::new();
        params.push("page", page).push("page_size", page_size);
        self.transport
            .get("/service/bulk-search/list", &params)
            .await
    }

    pub async fn wait_for_completion(
        &self,
        job_id: &str,
        poll_interval: Option<Duration>,
        timeout: Option<Duration>,
    ) -> Result<Envelope<BulkJob>> {
        self.jobs
            .wait_for_completion(job_id, poll_interval, timeout)
            .await
    }

    pub async fn download(&self, job_id: &str) -> Result<RawBody> {
        self.jobs.download(job_id).await
    }

    pub async fn download_to(&self, job_id: &str, path: impl AsRef<Path>) -> Result<PathBuf> {
        self.jobs.download_to(job_id, path).await
    }

    /// Create, wait for and download a bulk job in one call.
    pub async fn search(
        &self,
        terms: &[String],
        target: BulkTarget,
        output_path: impl AsRef<Path>,
        options: &BulkOptions,
        timeout: Option<Duration>,
    ) -> Result<PathBuf> {
        self.search_with_progress(terms, target, output_path, options, None, timeout, |_| {})
            .await
    }

    /// Like [`Self::search`], with an explicit poll interval and progress callback.
    #[allow(clippy::too_many_arguments)]
    pub async fn search_with_progress<P: FnMut(&BulkJob)>(
        &self,
        terms: &[String],
        target: BulkTarget,
        output_path: impl AsRef<Path>,
        options: &BulkOptions,
        poll_interval: Option<Duration>,
        timeout: Option<Duration>,
        on_progress: P,
    ) -> Result<PathBuf> {
        self.jobs
            .run_to_file(
                &request(terms, target, options),
                output_path,
                poll_interval,
                timeout,
                on_progress,
            )
            .await
    }
}

fn request<'a>(terms: &'a [String], target: BulkTarget, options: &'a BulkOptions) -> BulkRequest<'a> {
    BulkRequest {
        terms,
        service: target,
        format: options.format,
        dbnames: &options.dbnames,
    }
}
