//! Error types for the OathNet client.
//!
//! What this module handles:
//! - The error taxonomy every client operation returns.
//! - Classifying a non-2xx HTTP response into that taxonomy (`ClientError::from_response`).
//!
//! What this module does NOT handle:
//! - Retrying. No operation in this crate retries; `is_retryable()` only advises callers.
//!
//! Invariants:
//! - Credential wording in the response message ("credentials", "api key") wins over
//!   the status code.
//! - Only "quota" wording turns a 429 into `QuotaExceeded`.
//! - Network failures keep the underlying `reqwest::Error` untouched.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during OathNet client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The API key was missing, invalid or rejected.
    #[error("{message}")]
    Authentication {
        status: u16,
        message: String,
        body: String,
    },

    /// The request was rejected as malformed (HTTP 400).
    #[error("{message}")]
    Validation {
        status: u16,
        message: String,
        body: String,
    },

    /// The resource does not exist (HTTP 404).
    #[error("{message}")]
    NotFound {
        status: u16,
        message: String,
        body: String,
    },

    /// Too many requests (HTTP 429). Transient.
    #[error("{message}")]
    RateLimited {
        status: u16,
        message: String,
        body: String,
    },

    /// The account's lookup quota is spent (HTTP 429 mentioning quota).
    #[error("{message}")]
    QuotaExceeded {
        status: u16,
        message: String,
        body: String,
    },

    /// Any other failure reported by the service.
    #[error("{}{message}", .status.map(|s| format!("API error ({s}): ")).unwrap_or_default())]
    Service {
        status: Option<u16>,
        message: String,
        body: String,
    },

    /// A job did not reach a terminal state within the wait budget.
    #[error("{kind} job {job_id} did not complete within {}ms", .timeout.as_millis())]
    JobTimeout {
        kind: &'static str,
        job_id: String,
        timeout: Duration,
    },

    /// HTTP transport error (no response received).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A 2xx response whose body could not be decoded.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// No API key was supplied when building the client.
    #[error("API key is required")]
    MissingApiKey,

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A caller-supplied argument was rejected before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing a downloaded artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Classify a non-2xx response.
    ///
    /// The message is taken from the body's `message` or `error` field when the
    /// body is JSON; otherwise a generic "Request failed" message is used.
    pub fn from_response(status: u16, body: String) -> Self {
        let message = extract_message(&body)
            .unwrap_or_else(|| format!("Request failed with status code {status}"));
        let lowered = message.to_lowercase();

        if lowered.contains("credentials") || lowered.contains("api key") {
            return Self::Authentication {
                status,
                message,
                body,
            };
        }

        match status {
            401 => Self::Authentication {
                status,
                message,
                body,
            },
            400 => Self::Validation {
                status,
                message,
                body,
            },
            404 => Self::NotFound {
                status,
                message,
                body,
            },
            429 if lowered.contains("quota") => Self::QuotaExceeded {
                status,
                message,
                body,
            },
            429 => Self::RateLimited {
                status,
                message,
                body,
            },
            _ => Self::Service {
                status: Some(status),
                message,
                body,
            },
        }
    }

    /// HTTP status code, for errors derived from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. }
            | Self::Validation { status, .. }
            | Self::NotFound { status, .. }
            | Self::RateLimited { status, .. }
            | Self::QuotaExceeded { status, .. } => Some(*status),
            Self::Service { status, .. } => *status,
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body, for errors derived from a response.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Authentication { body, .. }
            | Self::Validation { body, .. }
            | Self::NotFound { body, .. }
            | Self::RateLimited { body, .. }
            | Self::QuotaExceeded { body, .. }
            | Self::Service { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Whether a caller may reasonably retry with backoff.
    ///
    /// Rate limits and service-side failures are retryable; quota exhaustion is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::Service { status, .. } => status.is_some(),
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Check if this error indicates a rejected or missing credential.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::MissingApiKey)
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
