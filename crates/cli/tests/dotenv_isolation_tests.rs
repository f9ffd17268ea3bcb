//! Regression tests for dotenv loading around CLI parsing.
//!
//! Responsibilities:
//! - Prove that `DOTENV_DISABLED=1` prevents the CLI from loading `.env`.
//! - Prove that, when enabled, `.env` in the working directory supplies the API key.
//!
//! Invariants / assumptions:
//! - The CLI loads dotenv before clap parsing so `env = "..."` args can read `.env` values.

mod common;

use common::oathnet_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_dotenv_disabled_ignores_env_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".env"),
        "OATHNET_API_KEY=from-dotenv\nOATHNET_BASE_URL=http://127.0.0.1:1\n",
    )
    .unwrap();

    oathnet_cmd()
        .current_dir(temp_dir.path())
        .args(["util", "health"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("API key is required"));
}

#[tokio::test]
async fn test_dotenv_enabled_supplies_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/service/v2/health"))
        .and(header("x-api-key", "from-dotenv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok",
            "dependencies": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".env"),
        format!(
            "OATHNET_API_KEY=from-dotenv\nOATHNET_BASE_URL={}\n",
            server.uri()
        ),
    )
    .unwrap();

    oathnet_cmd()
        .env_remove("DOTENV_DISABLED")
        .current_dir(temp_dir.path())
        .args(["util", "health"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: ok"));
}
