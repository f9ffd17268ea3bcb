//! Integration tests for `-o/--output` handling.
//!
//! Covers:
//! - Saving the raw envelope as pretty JSON alongside table output
//! - Streaming a job artifact to disk

mod common;

use common::oathnet_cmd_with_base_url;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_output_saves_raw_envelope() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("nested").join("breach.json");
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/search-breach"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"results": [{"dbname": "combo", "email": "a@x.io"}], "results_found": 1, "results_shown": 1}
        })))
        .mount(&server)
        .await;

    oathnet_cmd_with_base_url(&server.uri())
        .args(["search", "breach", "-q", "a@x.io", "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Results saved to"));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(saved["success"], json!(true));
    assert_eq!(saved["data"]["results"][0]["dbname"], json!("combo"));
}

#[tokio::test]
async fn test_export_download_writes_artifact_bytes() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("export.jsonl");
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/v2/exports/exp_1/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"{\"a\":1}\n{\"a\":2}\n".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    oathnet_cmd_with_base_url(&server.uri())
        .args(["--quiet", "export", "download", "exp_1", "-o"])
        .arg(&output_path)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output_path).unwrap(),
        "{\"a\":1}\n{\"a\":2}\n"
    );
}
