//! Client builder for constructing [`OathNetClient`] instances.
//!
//! This module is responsible for:
//! - A fluent builder API for the API key, base URL, timeout and metrics
//! - Validating the API key and normalizing the base URL
//! - Configuring the underlying HTTP client
//!
//! # What this module does NOT handle:
//! - Reading environment variables or `.env` files (see `oathnet_config::ConfigLoader`)
//! - Sending requests (see [`crate::client::transport`])
//!
//! # Invariants
//! - A blank API key never produces a client
//! - The stored base URL never ends with `/`

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use oathnet_config::Config;
use oathnet_config::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

use crate::client::OathNetClient;
use crate::client::transport::Transport;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Builder for creating a new [`OathNetClient`].
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use oathnet_client::OathNetClient;
///
/// let client = OathNetClient::builder()
///     .api_key("your-api-key")
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// ```
#[derive(Debug)]
pub struct OathNetClientBuilder {
    api_key: Option<SecretString>,
    base_url: String,
    timeout: Duration,
    metrics: Option<MetricsCollector>,
}

impl Default for OathNetClientBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            metrics: None,
        }
    }
}

impl OathNetClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key sent as `x-api-key` on every request.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Set the API key from an existing secret.
    pub fn api_key_secret(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Set the API base URL. Trailing slashes are removed.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Record request metrics through `metrics`.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Pre-fill the builder from loaded configuration.
    pub fn from_config(self, config: &Config) -> Self {
        self.api_key_secret(config.auth.api_key.clone())
            .base_url(config.connection.base_url.clone())
            .timeout(config.connection.timeout)
    }

    /// Build the client.
    ///
    /// # Errors
    /// - `MissingApiKey` if no key, or a blank key, was set
    /// - `InvalidUrl` if the base URL is not an absolute http(s) URL
    /// - `Http` if the HTTP client cannot be constructed
    pub fn build(self) -> Result<OathNetClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.expose_secret().trim().is_empty())
            .ok_or(ClientError::MissingApiKey)?;

        let base_url = normalize_base_url(&self.base_url)?;
        let transport = Transport::new(base_url, api_key, self.timeout, self.metrics)?;
        Ok(OathNetClient::from_transport(transport))
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed)
        .map_err(|e| ClientError::InvalidUrl(format!("{trimmed}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl(format!(
            "{trimmed}: scheme must be http or https"
        )));
    }
    Ok(trimmed.to_string())
}
