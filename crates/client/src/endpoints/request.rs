//! Sending requests and decoding responses.
//!
//! Responsibilities:
//! - Send a prepared request once and record request/latency/error metrics.
//! - Turn non-2xx responses into [`ClientError`] via `ClientError::from_response`.
//! - Decode 2xx bodies as JSON, as an [`Envelope`], or as raw bytes.
//!
//! Explicitly does NOT handle:
//! - Retries. Every request is sent exactly once.
//! - Authentication headers (set by the transport before calling in).

use std::time::Instant;

use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::Envelope;

/// Raw response body, for binary or non-JSON endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBody {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl RawBody {
    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Send `builder` once, mapping transport failures and non-2xx statuses to errors.
pub(crate) async fn send_request(
    builder: RequestBuilder,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    if let Some(m) = metrics {
        m.record_request(endpoint, method);
    }
    let started = Instant::now();

    let response = match builder.send().await {
        Ok(response) => response,
        Err(e) => {
            let err = ClientError::Http(e);
            if let Some(m) = metrics {
                m.record_request_duration(endpoint, method, started.elapsed(), None);
                m.record_client_error(endpoint, method, &err);
            }
            debug!(method, endpoint, error = %err, "request failed without a response");
            return Err(err);
        }
    };

    let status = response.status().as_u16();
    if let Some(m) = metrics {
        m.record_request_duration(endpoint, method, started.elapsed(), Some(status));
    }
    debug!(method, endpoint, status, "response received");

    if response.status().is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = ClientError::from_response(status, body);
    if let Some(m) = metrics {
        m.record_client_error(endpoint, method, &err);
    }
    Err(err)
}

/// Decode a 2xx body as `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        debug!(endpoint, error = %e, "response body did not match the expected shape");
        ClientError::InvalidResponse(format!("{endpoint}: {e}"))
    })
}

/// Decode a 2xx body into an envelope, wrapping bare payloads.
pub(crate) async fn read_envelope<T: DeserializeOwned>(
    response: Response,
    endpoint: &str,
) -> Result<Envelope<T>> {
    let value: Value = read_json(response, endpoint).await?;
    Envelope::from_value(value).map_err(|e| {
        debug!(endpoint, error = %e, "envelope payload did not match the expected shape");
        ClientError::InvalidResponse(format!("{endpoint}: {e}"))
    })
}

/// Collect a 2xx body as bytes, keeping its content type.
pub(crate) async fn read_raw(response: Response) -> Result<RawBody> {
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);
    let bytes = response.bytes().await?.to_vec();
    Ok(RawBody {
        bytes,
        content_type,
    })
}
