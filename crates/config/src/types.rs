//! Configuration types for the OathNet client.

mod auth;
mod connection;

pub use auth::AuthConfig;
pub use connection::{Config, ConnectionConfig};
