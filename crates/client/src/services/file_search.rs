//! Content search across victim log files, run as an async job.

use std::sync::Arc;
use std::time::Duration;

use oathnet_config::constants::{DEFAULT_FILE_SEARCH_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS};

use crate::client::transport::Transport;
use crate::error::Result;
use crate::jobs::{JobController, PollPolicy};
use crate::models::{Envelope, FileSearchJob, FileSearchOptions, FileSearchRequest};

#[derive(Debug)]
pub struct FileSearchService {
    jobs: JobController<FileSearchJob>,
}

impl FileSearchService {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            jobs: JobController::new(
                transport,
                PollPolicy::from_millis(DEFAULT_POLL_INTERVAL_MS, DEFAULT_FILE_SEARCH_TIMEOUT_MS),
            ),
        }
    }

    /// The underlying job controller.
    pub fn jobs(&self) -> &JobController<FileSearchJob> {
        &self.jobs
    }

    /// Submit a file-search job.
    pub async fn create(
        &self,
        expression: &str,
        options: &FileSearchOptions,
    ) -> Result<Envelope<FileSearchJob>> {
        self.jobs
            .create(&FileSearchRequest::new(expression, options))
            .await
    }

    pub async fn status(&self, job_id: &str) -> Result<Envelope<FileSearchJob>> {
        self.jobs.status(job_id).await
    }

    pub async fn wait_for_completion(
        &self,
        job_id: &str,
        poll_interval: Option<Duration>,
        timeout: Option<Duration>,
    ) -> Result<Envelope<FileSearchJob>> {
        self.jobs
            .wait_for_completion(job_id, poll_interval, timeout)
            .await
    }

    /// Create a job and wait for its matches.
    pub async fn search(
        &self,
        expression: &str,
        options: &FileSearchOptions,
        timeout: Option<Duration>,
    ) -> Result<Envelope<FileSearchJob>> {
        self.search_with_progress(expression, options, None, timeout, |_| {})
            .await
    }

    /// Like [`Self::search`], with an explicit poll interval and progress callback.
    pub async fn search_with_progress<P: FnMut(&FileSearchJob)>(
        &self,
        expression: &str,
        options: &FileSearchOptions,
        poll_interval: Option<Duration>,
        timeout: Option<Duration>,
        on_progress: P,
    ) -> Result<Envelope<FileSearchJob>> {
        self.jobs
            .run_with_progress(
                &FileSearchRequest::new(expression, options),
                poll_interval,
                timeout,
                on_progress,
            )
            .await
    }
}
