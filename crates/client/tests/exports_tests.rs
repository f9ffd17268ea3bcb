//! Export job lifecycle and artifact download tests.

mod common;

use std::time::Duration;

use common::*;
use oathnet_client::{ExportFormat, ExportOptions, ExportType};
use wiremock::matchers::{body_partial_json, method, path};

async fn mount_create(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/service/v2/exports"))
        .and(body_partial_json(serde_json::json!({"type": "docs", "format": "csv"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"job_id": "ex_1", "status": "queued"}
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn csv_options() -> ExportOptions {
    ExportOptions {
        format: ExportFormat::Csv,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_export_waits_then_downloads() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("docs.csv");
    mount_create(&server).await;

    Mock::given(method("GET"))
        .and(path("/service/v2/exports/ex_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"job_id": "ex_1", "status": "running", "progress": {"records_done": 10, "records_total": 20}}
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/service/v2/exports/ex_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "job_id": "ex_1",
                "status": "completed",
                "result": {"file_name": "docs.csv", "records": 20}
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/service/v2/exports/ex_1/download"))
        .respond_with(ResponseTemplate::new(200).set_body_string("url,username\nexample.com,alice\n"))
        .expect(1)
        .mount(&server)
        .await;

    let mut polls = 0;
    let written = client(&server)
        .exports()
        .export_with_progress(
            ExportType::Docs,
            &target,
            &csv_options(),
            FAST_POLL,
            Some(Duration::from_secs(5)),
            |_| polls += 1,
        )
        .await
        .unwrap();

    assert_eq!(polls, 1);
    assert!(written.ends_with("docs.csv"));
    assert_eq!(
        std::fs::read_to_string(&target).unwrap(),
        "url,username\nexample.com,alice\n"
    );
}

#[tokio::test]
async fn test_failed_export_is_not_downloaded() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("docs.csv");
    mount_create(&server).await;

    Mock::given(method("GET"))
        .and(path("/service/v2/exports/ex_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"job_id": "ex_1", "status": "failed"}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/service/v2/exports/ex_1/download"))
        .respond_with(ResponseTemplate::new(200).set_body_string("never"))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server)
        .exports()
        .export_with_progress(ExportType::Docs, &target, &csv_options(), FAST_POLL, None, |_| {})
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Export job ex_1 ended with status failed");
    assert!(!target.exists());
}

#[tokio::test]
async fn test_create_without_job_id_fails() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/service/v2/exports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "Export limit reached"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .exports()
        .export(ExportType::Victims, dir.path().join("v.jsonl"), &ExportOptions::default(), None)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Export limit reached");
}
