//! Bulk search job tests.
//!
//! Bulk jobs differ from the v2 jobs: the id may arrive as `id`, statuses
//! may be upper-case, and the artifact is fetched by query parameter.

mod common;

use std::time::Duration;

use common::*;
use oathnet_client::{BulkFormat, BulkOptions, BulkTarget, JobStatus};
use wiremock::matchers::{body_json, method, path, query_param};

#[tokio::test]
async fn test_list_returns_bare_job_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/bulk-search/list"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {"id": "b_1", "status": "COMPLETED", "service": "breach"},
                {"id": "b_2", "status": "PROCESSING", "service": "stealer"}
            ],
            "total": 7,
            "page": 2,
            "page_size": 5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = client(&server).bulk().list(2, 5).await.unwrap();

    assert_eq!(list.total, Some(7));
    assert_eq!(list.jobs.len(), 2);
    assert_eq!(list.jobs[0].status, Some(JobStatus::Completed));
    assert_eq!(list.jobs[1].status, Some(JobStatus::Running));
}

#[tokio::test]
async fn test_search_uses_id_alias_and_downloads_by_query() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("bulk.json");
    let terms = vec!["alice@example.com".to_string(), "bob@example.com".to_string()];

    Mock::given(method("POST"))
        .and(path("/service/bulk-search"))
        .and(body_json(serde_json::json!({
            "terms": ["alice@example.com", "bob@example.com"],
            "service": "breach",
            "format": "json"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"id": "b_42", "status": "PENDING"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/service/bulk-search/b_42/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "b_42",
            "status": "COMPLETED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/service/bulk-search/download"))
        .and(query_param("job_id", "b_42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"term":"alice@example.com","hits":3}]"#))
        .expect(1)
        .mount(&server)
        .await;

    let written = client(&server)
        .bulk()
        .search_with_progress(
            &terms,
            BulkTarget::Breach,
            &target,
            &BulkOptions::default(),
            FAST_POLL,
            Some(Duration::from_secs(5)),
            |_| {},
        )
        .await
        .unwrap();

    assert_eq!(written, std::path::absolute(&target).unwrap());
    assert!(std::fs::read_to_string(&target).unwrap().contains("\"hits\":3"));
}

#[tokio::test]
async fn test_create_sends_dbnames_and_csv() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/service/bulk-search"))
        .and(body_json(serde_json::json!({
            "terms": ["example.com"],
            "service": "stealer",
            "format": "csv",
            "dbnames": ["forum_dump"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"job_id": "b_7", "status": "pending"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = BulkOptions {
        format: BulkFormat::Csv,
        dbnames: vec!["forum_dump".to_string()],
    };
    let envelope = client(&server)
        .bulk()
        .create(&["example.com".to_string()], BulkTarget::Stealer, &options)
        .await
        .unwrap();

    assert_eq!(envelope.data().unwrap().job_id.as_deref(), Some("b_7"));
}

#[tokio::test]
async fn test_session_only_endpoint_error_passes_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/bulk-search/list"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"detail": "Authentication credentials were not provided."})),
        )
        .mount(&server)
        .await;

    let err = client(&server).bulk().list(1, 10).await.unwrap_err();

    assert!(matches!(err, ClientError::Authentication { status: 401, .. }));
}
