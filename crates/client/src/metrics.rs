//! Metrics collection for API calls and job polling.
//!
//! This module records, through the `metrics` crate facade:
//! - Request counters and latency histograms per endpoint
//! - Error counters by category
//! - Job poll counters by job kind
//!
//! # What this module does NOT handle:
//! - Exposition (see [`crate::metrics_exporter`])
//! - Persistent storage of metrics
//!
//! # Invariants
//! - Label names are `endpoint`, `method`, `status`, `error_category`, `kind`
//! - Endpoint labels never contain caller identifiers (see [`endpoint_label`])
//! - Recording is a no-op when no global recorder is installed

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "oathnet_api_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "oathnet_api_requests_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "oathnet_api_errors_total";

/// Metric name for job status poll counter.
pub const METRIC_JOB_POLLS_TOTAL: &str = "oathnet_job_polls_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection, DNS or other transport-level failure
    Transport,
    /// Request timed out before a response arrived
    Timeout,
    /// Rejected credentials
    Auth,
    /// Rate limited or quota spent
    RateLimit,
    /// Other HTTP 4xx
    Http4xx,
    /// HTTP 5xx
    Http5xx,
    /// 2xx body that could not be decoded
    Decode,
    /// Job wait budget exhausted
    JobTimeout,
    /// Anything else
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Auth => "auth",
            ErrorCategory::RateLimit => "rate_limit",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Decode => "decode",
            ErrorCategory::JobTimeout => "job_timeout",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::Authentication { .. } | ClientError::MissingApiKey => ErrorCategory::Auth,
            ClientError::RateLimited { .. } | ClientError::QuotaExceeded { .. } => {
                ErrorCategory::RateLimit
            }
            ClientError::Validation { .. } | ClientError::NotFound { .. } => ErrorCategory::Http4xx,
            ClientError::Service {
                status: Some(status),
                ..
            } => match status {
                400..=499 => ErrorCategory::Http4xx,
                500..=599 => ErrorCategory::Http5xx,
                _ => ErrorCategory::Unknown,
            },
            ClientError::Http(e) if e.is_timeout() => ErrorCategory::Timeout,
            ClientError::Http(e) if e.is_connect() || e.is_request() => ErrorCategory::Transport,
            ClientError::InvalidResponse(_) => ErrorCategory::Decode,
            ClientError::JobTimeout { .. } => ErrorCategory::JobTimeout,
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Collapse a request path into a low-cardinality metrics label.
///
/// Segments made of lowercase letters, `-` and `_` are route names and are
/// kept, as are version markers like `v2`. Anything else is an identifier
/// and becomes `{id}`.
pub fn endpoint_label(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            let is_route = segment
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '-' || c == '_');
            let is_version = segment.len() > 1
                && segment.starts_with('v')
                && segment[1..].chars().all(|c| c.is_ascii_digit());
            if is_route || is_version {
                segment
            } else {
                "{id}"
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Metrics collector for OathNet API calls.
///
/// A thin wrapper around the `metrics` macros so every call site uses the same
/// names and labels.
///
/// # Example
///
/// ```rust,ignore
/// use oathnet_client::metrics::MetricsCollector;
///
/// let collector = MetricsCollector::new();
/// collector.record_request_duration("/service/v2/health", "GET", Duration::from_millis(150), Some(200));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of an API request.
    ///
    /// `status` is `None` when no response was received.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint_label(endpoint),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint_label(endpoint),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record an error.
    pub fn record_error(&self, endpoint: &str, method: &str, category: ErrorCategory) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint_label(endpoint),
            "method" => method.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Record an error, categorizing it automatically.
    pub fn record_client_error(&self, endpoint: &str, method: &str, error: &ClientError) {
        self.record_error(endpoint, method, ErrorCategory::from(error));
    }

    /// Record one status poll of an async job.
    pub fn record_job_poll(&self, kind: &'static str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_JOB_POLLS_TOTAL, "kind" => kind).increment(1);
    }
}
