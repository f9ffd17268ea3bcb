//! Authentication configuration.
//!
//! Responsibilities:
//! - Hold the API key as a `SecretString` so it never appears in `Debug` output.
//!
//! Does NOT handle:
//! - Reading the key from the environment (see `loader::env`).
//! - Attaching the key to requests (see the client transport).
//!
//! Invariants:
//! - The key is non-empty once a `Config` has been built.

use secrecy::{ExposeSecret, SecretString};

/// Authentication configuration for the OathNet API.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// API key sent in the `x-api-key` header.
    pub api_key: SecretString,
}

impl AuthConfig {
    /// Create an auth config from a raw key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into().into()),
        }
    }

    /// Whether the key is blank after trimming.
    pub fn is_blank(&self) -> bool {
        self.api_key.expose_secret().trim().is_empty()
    }
}
