//! File-search job lifecycle tests.
//!
//! Covers:
//! - Request body defaults on create
//! - Polling until a terminal status, with progress callbacks
//! - Timeout while the job stays queued
//!
//! Polling uses a 10ms interval so these run on the real clock.

mod common;

use std::time::Duration;

use common::*;
use oathnet_client::{FileSearchOptions, JobStatus, SearchMode};
use wiremock::matchers::{body_partial_json, method, path};

async fn mount_create(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/service/v2/file-search"))
        .and(body_partial_json(serde_json::json!({
            "expression": "example.com",
            "search_mode": "literal",
            "max_matches": 100
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"job_id": "fs_01", "status": "queued"}
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_polls_until_completed() {
    let server = MockServer::start().await;
    mount_create(&server).await;

    Mock::given(method("GET"))
        .and(path("/service/v2/file-search/fs_01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "job_id": "fs_01",
                "status": "running",
                "progress": {"files_total": 40, "files_scanned": 12, "percent": 30.0}
            }
        })))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/service/v2/file-search/fs_01"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("jobs/file_search_completed.json")),
        )
        .mount(&server)
        .await;

    let mut seen = Vec::new();
    let envelope = client(&server)
        .file_search()
        .search_with_progress(
            "example.com",
            &FileSearchOptions::default(),
            FAST_POLL,
            Some(Duration::from_secs(5)),
            |job| seen.push(job.status.clone()),
        )
        .await
        .unwrap();

    let job = envelope.into_data().unwrap();
    assert_eq!(job.status, Some(JobStatus::Completed));
    assert_eq!(job.matches.len(), 1);
    assert_eq!(job.matches[0].line_number, Some(12));
    assert_eq!(seen, vec![Some(JobStatus::Running), Some(JobStatus::Running)]);
}

#[tokio::test]
async fn test_wait_times_out_on_stuck_job() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/v2/file-search/fs_stuck"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"job_id": "fs_stuck", "status": "queued"}
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .file_search()
        .wait_for_completion("fs_stuck", FAST_POLL, Some(Duration::from_millis(60)))
        .await
        .unwrap_err();

    match err {
        ClientError::JobTimeout { kind, job_id, .. } => {
            assert_eq!(kind, "File search");
            assert_eq!(job_id, "fs_stuck");
        }
        other => panic!("expected JobTimeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_job_is_returned_not_raised() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/v2/file-search/fs_bad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"job_id": "fs_bad", "status": "FAILED"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client(&server)
        .file_search()
        .wait_for_completion("fs_bad", FAST_POLL, None)
        .await
        .unwrap();

    assert_eq!(envelope.data().unwrap().status, Some(JobStatus::Failed));
}

#[tokio::test]
async fn test_create_sends_custom_options() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/service/v2/file-search"))
        .and(body_partial_json(serde_json::json!({
            "search_mode": "regex",
            "case_sensitive": true,
            "log_ids": ["LOG-A"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"job_id": "fs_02", "status": "queued"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = FileSearchOptions {
        search_mode: SearchMode::Regex,
        case_sensitive: true,
        log_ids: vec!["LOG-A".to_string()],
        ..Default::default()
    };
    let envelope = client(&server)
        .file_search()
        .create("pass(word)?", &options)
        .await
        .unwrap();

    assert_eq!(envelope.data().unwrap().job_id.as_deref(), Some("fs_02"));
}
