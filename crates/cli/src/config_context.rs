//! Configuration context for command execution.
//!
//! Responsibilities:
//! - Distinguish commands that talk to the API from those that do not
//!   (`completions`), so the latter run without an API key.
//!
//! Does NOT handle:
//! - Configuration loading (done in `main()`).
//!
//! Invariants:
//! - A placeholder context can never produce a client.

use oathnet_config::Config;

pub(crate) enum ConfigCommandContext {
    /// A validated config built from `.env`, environment and flags.
    Real(Box<Config>),
    /// For commands that never make a request.
    Placeholder,
}

impl ConfigCommandContext {
    /// Extract the real config, failing if this is a placeholder.
    pub(crate) fn into_real_config(self) -> anyhow::Result<Config> {
        match self {
            ConfigCommandContext::Real(config) => Ok(*config),
            ConfigCommandContext::Placeholder => {
                anyhow::bail!(
                    "Internal error: attempted to use placeholder config for an operation requiring an API key"
                )
            }
        }
    }
}
