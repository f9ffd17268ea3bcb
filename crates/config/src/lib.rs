//! Configuration management for the OathNet SDK and CLI.
//!
//! This crate provides the connection/auth configuration types and a loader
//! that assembles them from `.env` files, environment variables and explicit
//! overrides.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{AuthConfig, Config, ConnectionConfig};
