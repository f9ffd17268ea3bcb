//! Shared test utilities for oathnet CLI integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Point the CLI at a mock server with a dummy API key.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper are hermetic by default.
//! - No `OATHNET_*` variable leaks in from the host environment.

use assert_cmd::Command;

/// API key every mock-backed command sends.
#[allow(dead_code)]
pub const TEST_API_KEY: &str = "test-key";

/// Returns a hermetic `oathnet` command with no credentials configured.
pub fn oathnet_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("oathnet");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    cmd.env_remove("OATHNET_API_KEY")
        .env_remove("OATHNET_BASE_URL")
        .env_remove("OATHNET_TIMEOUT")
        .env_remove("RUST_LOG");

    cmd
}

/// Returns a hermetic `oathnet` command configured for `base_url` through the environment.
#[allow(dead_code)]
pub fn oathnet_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = oathnet_cmd();
    cmd.env("OATHNET_API_KEY", TEST_API_KEY)
        .env("OATHNET_BASE_URL", base_url);
    cmd
}
