//! Asynchronous job lifecycle shared by file-search, export and bulk jobs.
//!
//! Responsibilities:
//! - Create a job, fetch its status, and poll until it reaches a terminal state.
//! - Honor the server's `next_poll_after_ms` hint without exceeding the
//!   caller's poll interval.
//! - Enforce a wall-clock budget measured from the start of the wait.
//! - Download the artifact of jobs that produce one.
//!
//! Explicitly does NOT handle:
//! - Cancelling jobs server-side. A timed-out job is left running.
//! - Retrying failed polls. The first error ends the wait.
//!
//! Invariants:
//! - Polls are strictly sequential; at most one status request is in flight.
//! - A terminal response is returned immediately, with no trailing sleep.
//! - Once the budget is spent no further poll is issued.

use std::future::Future;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::client::transport::Transport;
use crate::download;
use crate::endpoints::{QueryParams, RawBody};
use crate::error::{ClientError, Result};
use crate::models::{Envelope, JobStatus};

/// Lower bound on the delay between two polls.
const MIN_POLL_DELAY: Duration = Duration::from_millis(1);

/// A server-side job that can be created and polled.
pub trait TrackedJob: DeserializeOwned + Send + Sync + 'static {
    /// Human-readable job kind, used in errors and metrics.
    const KIND: &'static str;

    fn create_path() -> &'static str;

    fn status_path(job_id: &str) -> String;

    fn job_id(&self) -> Option<&str>;

    fn status(&self) -> Option<&JobStatus>;

    /// Server-suggested delay before the next poll.
    fn next_poll_after(&self) -> Option<Duration>;

    fn is_terminal(&self) -> bool {
        self.status().is_some_and(JobStatus::is_terminal)
    }
}

/// A job whose completed result is downloaded as a file.
pub trait ArtifactJob: TrackedJob {
    /// Path and query of the download request for `job_id`.
    fn download_request(job_id: &str) -> (String, QueryParams);
}

/// Default poll interval and wait budget for one job kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl PollPolicy {
    pub const fn from_millis(poll_interval_ms: u64, timeout_ms: u64) -> Self {
        Self {
            poll_interval: Duration::from_millis(poll_interval_ms),
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

/// Create/status/wait/download operations for one job type.
pub struct JobController<J> {
    transport: Arc<Transport>,
    policy: PollPolicy,
    _job: PhantomData<fn() -> J>,
}

impl<J> std::fmt::Debug for JobController<J> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobController")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<J: TrackedJob> JobController<J> {
    pub(crate) fn new(transport: Arc<Transport>, policy: PollPolicy) -> Self {
        Self {
            transport,
            policy,
            _job: PhantomData,
        }
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Submit a new job.
    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<Envelope<J>> {
        debug!(kind = J::KIND, "creating job");
        self.transport.post_envelope(J::create_path(), body).await
    }

    /// Fetch the current state of a job.
    pub async fn status(&self, job_id: &str) -> Result<Envelope<J>> {
        if let Some(m) = self.transport.metrics() {
            m.record_job_poll(J::KIND);
        }
        self.transport
            .get_envelope(&J::status_path(job_id), &QueryParams::new())
            .await
    }

    /// Poll until the job is terminal or the budget runs out.
    ///
    /// `None` for either argument uses this controller's [`PollPolicy`].
    pub async fn wait_for_completion(
        &self,
        job_id: &str,
        poll_interval: Option<Duration>,
        timeout: Option<Duration>,
    ) -> Result<Envelope<J>> {
        self.wait_with_progress(job_id, poll_interval, timeout, |_| {})
            .await
    }

    /// Like [`Self::wait_for_completion`], reporting every non-terminal poll.
    pub async fn wait_with_progress<P: FnMut(&J)>(
        &self,
        job_id: &str,
        poll_interval: Option<Duration>,
        timeout: Option<Duration>,
        on_progress: P,
    ) -> Result<Envelope<J>> {
        poll_until_terminal(
            job_id,
            poll_interval.unwrap_or(self.policy.poll_interval),
            timeout.unwrap_or(self.policy.timeout),
            || self.status(job_id),
            on_progress,
        )
        .await
    }

    /// Create a job and wait for it.
    pub async fn run<B: Serialize + ?Sized>(
        &self,
        body: &B,
        poll_interval: Option<Duration>,
        timeout: Option<Duration>,
    ) -> Result<Envelope<J>> {
        self.run_with_progress(body, poll_interval, timeout, |_| {})
            .await
    }

    /// Create a job and wait for it, reporting every non-terminal poll.
    pub async fn run_with_progress<B: Serialize + ?Sized, P: FnMut(&J)>(
        &self,
        body: &B,
        poll_interval: Option<Duration>,
        timeout: Option<Duration>,
        on_progress: P,
    ) -> Result<Envelope<J>> {
        let job_id = self.create_job_id(body).await?;
        self.wait_with_progress(&job_id, poll_interval, timeout, on_progress)
            .await
    }

    /// Create a job and return its id, failing if the server did not assign one.
    async fn create_job_id<B: Serialize + ?Sized>(&self, body: &B) -> Result<String> {
        let created = self.create(body).await?;
        let job_id = created
            .data()
            .and_then(|job| job.job_id())
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        match job_id {
            Some(job_id) => {
                debug!(kind = J::KIND, job_id = %job_id, "job created, waiting");
                Ok(job_id)
            }
            None => Err(ClientError::Service {
                status: None,
                message: created
                    .message
                    .unwrap_or_else(|| format!("{} job was not created", J::KIND)),
                body: String::new(),
            }),
        }
    }
}

impl<J: ArtifactJob> JobController<J> {
    /// Fetch a completed job's artifact into memory.
    pub async fn download(&self, job_id: &str) -> Result<RawBody> {
        let (path, query) = J::download_request(job_id);
        self.transport.get_raw(&path, &query).await
    }

    /// Fetch a completed job's artifact and write it to `path` atomically.
    ///
    /// Returns the absolute path written.
    pub async fn download_to(&self, job_id: &str, path: impl AsRef<Path>) -> Result<PathBuf> {
        let body = self.download(job_id).await?;
        download::write_atomic(path.as_ref(), body.bytes).await
    }

    /// Create a job, wait for it and download its artifact to `path`.
    ///
    /// A job that ends in any state other than completed is an error and
    /// nothing is downloaded.
    pub async fn run_to_file<B: Serialize + ?Sized, P: FnMut(&J)>(
        &self,
        body: &B,
        path: impl AsRef<Path>,
        poll_interval: Option<Duration>,
        timeout: Option<Duration>,
        on_progress: P,
    ) -> Result<PathBuf> {
        let job_id = self.create_job_id(body).await?;
        let finished = self
            .wait_with_progress(&job_id, poll_interval, timeout, on_progress)
            .await?;
        ensure_completed(&finished, &job_id)?;
        self.download_to(&job_id, path).await
    }
}

/// Reject a terminal job that did not complete successfully.
fn ensure_completed<J: TrackedJob>(envelope: &Envelope<J>, job_id: &str) -> Result<()> {
    match envelope.data().and_then(TrackedJob::status) {
        Some(JobStatus::Completed) => Ok(()),
        status => Err(ClientError::Service {
            status: None,
            message: format!(
                "{} job {job_id} ended with status {}",
                J::KIND,
                status.map_or("unknown", JobStatus::as_str)
            ),
            body: String::new(),
        }),
    }
}

/// Poll `fetch` until it yields a terminal job, sleeping between polls.
///
/// The delay before the next poll is the server hint when present and
/// non-zero, capped at `poll_interval`, and never longer than what is left of
/// `timeout`.
pub(crate) async fn poll_until_terminal<J, F, Fut, P>(
    job_id: &str,
    poll_interval: Duration,
    timeout: Duration,
    mut fetch: F,
    mut on_progress: P,
) -> Result<Envelope<J>>
where
    J: TrackedJob,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Envelope<J>>>,
    P: FnMut(&J),
{
    let started = Instant::now();
    let timed_out = || ClientError::JobTimeout {
        kind: J::KIND,
        job_id: job_id.to_string(),
        timeout,
    };

    loop {
        let envelope = fetch().await?;
        match envelope.data().map(TrackedJob::is_terminal) {
            Some(true) => return Ok(envelope),
            // No usable payload: surface the server's message.
            None => return envelope.into_data().map(Envelope::ok),
            Some(false) => {}
        }
        let hint = envelope.data().and_then(|job| {
            on_progress(job);
            job.next_poll_after()
        });

        let elapsed = started.elapsed();
        if elapsed >= timeout {
            return Err(timed_out());
        }

        let delay = hint
            .filter(|d| !d.is_zero())
            .map_or(poll_interval, |d| d.min(poll_interval))
            .max(MIN_POLL_DELAY)
            .min(timeout - elapsed);
        debug!(kind = J::KIND, job_id, delay_ms = delay.as_millis() as u64, "job not finished");
        sleep(delay).await;

        if started.elapsed() >= timeout {
            return Err(timed_out());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileSearchJob;
    use std::collections::VecDeque;

    fn job(status: &str, hint_ms: Option<u64>) -> Envelope<FileSearchJob> {
        Envelope::ok(FileSearchJob {
            job_id: Some("fs_1".to_string()),
            status: Some(JobStatus::parse(status)),
            next_poll_after_ms: hint_ms,
            ..Default::default()
        })
    }

    /// Runs the poll loop over scripted responses, returning the result and
    /// the offset of each poll from the start.
    async fn drive(
        responses: Vec<Envelope<FileSearchJob>>,
        poll_interval_ms: u64,
        timeout_ms: u64,
    ) -> (Result<Envelope<FileSearchJob>>, Vec<u64>) {
        let start = Instant::now();
        let mut script = VecDeque::from(responses);
        let mut polls = Vec::new();
        let result = poll_until_terminal(
            "fs_1",
            Duration::from_millis(poll_interval_ms),
            Duration::from_millis(timeout_ms),
            || {
                polls.push(start.elapsed().as_millis() as u64);
                let next = script.pop_front().unwrap_or_else(|| job("running", None));
                std::future::ready(Ok(next))
            },
            |_| {},
        )
        .await;
        (result, polls)
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_on_first_poll_returns_without_sleeping() {
        let (result, polls) = drive(vec![job("completed", Some(10_000))], 2000, 60_000).await;
        assert_eq!(polls, vec![0]);
        assert_eq!(
            result.unwrap().data().and_then(|j| j.status.clone()),
            Some(JobStatus::Completed)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_hint_shortens_interval() {
        let (result, polls) = drive(
            vec![job("queued", Some(500)), job("running", Some(500)), job("completed", None)],
            2000,
            60_000,
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(polls, vec![0, 500, 1000]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hint_longer_than_interval_is_capped() {
        let (_, polls) = drive(
            vec![job("running", Some(9000)), job("failed", None)],
            2000,
            60_000,
        )
        .await;
        assert_eq!(polls, vec![0, 2000]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_hint_means_poll_interval() {
        let (_, polls) = drive(
            vec![job("running", Some(0)), job("canceled", None)],
            1500,
            60_000,
        )
        .await;
        assert_eq!(polls, vec![0, 1500]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_stops_without_extra_poll() {
        let (result, polls) = drive(vec![], 2000, 1).await;
        assert_eq!(polls, vec![0]);
        match result {
            Err(ClientError::JobTimeout { kind, job_id, timeout }) => {
                assert_eq!(kind, "File search");
                assert_eq!(job_id, "fs_1");
                assert_eq!(timeout, Duration::from_millis(1));
            }
            other => panic!("expected JobTimeout, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_is_capped_by_remaining_budget() {
        let (result, polls) = drive(vec![], 2000, 5000).await;
        assert_eq!(polls, vec![0, 2000, 4000]);
        assert!(matches!(result, Err(ClientError::JobTimeout { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsuccessful_envelope_ends_wait() {
        let failed = Envelope::<FileSearchJob> {
            success: false,
            message: Some("job not found".to_string()),
            data: None,
        };
        let (result, polls) = drive(vec![failed], 2000, 60_000).await;
        assert_eq!(polls, vec![0]);
        assert_eq!(result.unwrap_err().to_string(), "job not found");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_error_is_propagated() {
        let result = poll_until_terminal::<FileSearchJob, _, _, _>(
            "fs_1",
            Duration::from_millis(10),
            Duration::from_secs(1),
            || std::future::ready(Err(ClientError::from_response(404, "{}".to_string()))),
            |_| {},
        )
        .await;
        assert!(matches!(result, Err(ClientError::NotFound { .. })));
    }

    #[test]
    fn test_ensure_completed_rejects_failed_and_canceled() {
        assert!(ensure_completed(&job("completed", None), "fs_1").is_ok());
        let err = ensure_completed(&job("FAILED", None), "fs_1").unwrap_err();
        assert_eq!(err.to_string(), "File search job fs_1 ended with status failed");
        assert!(ensure_completed(&job("canceled", None), "fs_1").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_sees_every_non_terminal_poll() {
        let mut seen = Vec::new();
        let mut script = VecDeque::from(vec![
            job("queued", None),
            job("running", None),
            job("completed", None),
        ]);
        poll_until_terminal(
            "fs_1",
            Duration::from_millis(100),
            Duration::from_secs(10),
            || std::future::ready(Ok(script.pop_front().unwrap())),
            |j: &FileSearchJob| seen.push(j.status.clone()),
        )
        .await
        .unwrap();
        assert_eq!(seen, vec![Some(JobStatus::Queued), Some(JobStatus::Running)]);
    }
}
