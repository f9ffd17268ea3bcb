//! Connection configuration types.
//!
//! Responsibilities:
//! - Define connection settings (base URL, request timeout).
//! - Define the main `Config` structure combining connection and auth.
//!
//! Does NOT handle:
//! - Configuration loading from env/dotenv (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - `base_url` never ends with a `/`.
//! - Default values come from `constants`, not magic numbers.

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::types::auth::AuthConfig;
use std::time::Duration;

/// Connection configuration for the OathNet API.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base URL every request path is appended to (e.g. https://oathnet.org/api)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Main configuration passed to the client facade.
#[derive(Debug, Clone)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub auth: AuthConfig,
}

impl Config {
    /// Create a config with default connection settings and the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            connection: ConnectionConfig::default(),
            auth: AuthConfig::new(api_key),
        }
    }
}
