//! Victim profile search, manifest and file download tests.

mod common;

use common::*;
use oathnet_client::VictimsSearchOptions;
use wiremock::matchers::{method, path};

#[tokio::test]
async fn test_search_decodes_victim_profiles() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/v2/victims/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "items": [
                    {"log_id": "LOG-A", "device_users": ["alice"], "hwids": ["HW-1"], "total_docs": 41},
                    {"log_id": "LOG-A", "device_users": ["alice"]},
                    {"log_id": "LOG-B", "discord_ids": ["1234"]}
                ],
                "meta": {"total": 3, "count": 3, "has_more": false}
            }
        })))
        .mount(&server)
        .await;

    let envelope = client(&server)
        .victims()
        .search("alice", &VictimsSearchOptions::default())
        .await
        .unwrap();

    let data = envelope.data().unwrap();
    assert_eq!(data.log_ids(), vec!["LOG-A", "LOG-B"]);
    assert_eq!(data.items[0].total_docs, Some(41));
    assert!(data.next_cursor.is_none());
}

#[tokio::test]
async fn test_bare_manifest_is_wrapped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/v2/victims/LOG-A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("victims/manifest.json")))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client(&server).victims().manifest("LOG-A").await.unwrap();

    assert!(envelope.success);
    let manifest = envelope.into_data().unwrap();
    assert_eq!(manifest.log_name.as_deref(), Some("DESKTOP-1234_2025-11-02"));
    let files = manifest.victim_tree.files();
    let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["LOG-A/Passwords.txt", "LOG-A/Browsers/Cookies.txt"]);
    assert_eq!(manifest.victim_tree.total_size(), 2560);
}

#[tokio::test]
async fn test_file_returns_raw_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/v2/victims/LOG-A/files/f1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/plain")
                .set_body_string("URL: https://accounts.example.com\nUSER: alice\n"),
        )
        .mount(&server)
        .await;

    let body = client(&server).victims().file("LOG-A", "f1").await.unwrap();

    assert_eq!(body.content_type.as_deref(), Some("text/plain"));
    assert!(body.text().contains("USER: alice"));
}

#[tokio::test]
async fn test_log_id_is_path_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/v2/victims/LOG%20A%2F1/archive"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x50, 0x4b, 0x03, 0x04]))
        .expect(1)
        .mount(&server)
        .await;

    let body = client(&server).victims().archive("LOG A/1").await.unwrap();

    assert_eq!(body.bytes, vec![0x50, 0x4b, 0x03, 0x04]);
}

#[tokio::test]
async fn test_archive_to_writes_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("LOG-A.zip");

    Mock::given(method("GET"))
        .and(path("/service/v2/victims/LOG-A/archive"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK-archive".to_vec()))
        .mount(&server)
        .await;

    let written = client(&server)
        .victims()
        .archive_to("LOG-A", &target)
        .await
        .unwrap();

    assert!(written.is_absolute());
    assert_eq!(std::fs::read(&target).unwrap(), b"PK-archive");
}

#[tokio::test]
async fn test_missing_victim_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/v2/victims/LOG-X"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "Log not found"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).victims().manifest("LOG-X").await.unwrap_err();

    assert!(matches!(err, ClientError::NotFound { .. }));
    assert_eq!(err.to_string(), "Log not found");
}
