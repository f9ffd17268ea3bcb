//! OSINT lookup tests.

mod common;

use common::*;
use oathnet_client::RobloxLookup;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};

#[tokio::test]
async fn test_roblox_lookup_requires_id_or_username() {
    let server = MockServer::start().await;

    let lookup = RobloxLookup::default();
    let err = client(&server)
        .osint()
        .roblox_userinfo(&lookup)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidArgument(_)));
    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_roblox_lookup_by_username_decodes_labelled_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/roblox-userinfo"))
        .and(query_param("username", "builderman"))
        .and(query_param_is_missing("user_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "Current Username": "builderman",
                "Old Usernames": "None",
                "Display Name": "builderman",
                "User ID": "156",
                "Join Date": "2006-03-08"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client(&server)
        .osint()
        .roblox_userinfo(&RobloxLookup::by_username("builderman"))
        .await
        .unwrap();

    let data = envelope.into_data().unwrap();
    assert_eq!(data.current_username.as_deref(), Some("builderman"));
    assert_eq!(data.join_date.as_deref(), Some("2006-03-08"));
}

#[tokio::test]
async fn test_discord_username_history() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/discord-username-history"))
        .and(query_param("discord_id", "80351110224678912"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "history": [
                    {"name": ["old_name"], "time": ["2021-05-01"]},
                    {"name": ["new_name"], "time": ["2023-09-12"]}
                ],
                "lookups_left": 42
            }
        })))
        .mount(&server)
        .await;

    let envelope = client(&server)
        .osint()
        .discord_username_history("80351110224678912")
        .await
        .unwrap();

    let data = envelope.into_data().unwrap();
    assert_eq!(data.history.len(), 2);
    assert_eq!(data.history[1].name, vec!["new_name"]);
}

#[tokio::test]
async fn test_extract_subdomain_sends_alive_flag() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/extract-subdomain"))
        .and(query_param("domain", "example.com"))
        .and(query_param("is_alive", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"subdomains": ["www.example.com", "mail.example.com"], "count": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client(&server)
        .osint()
        .extract_subdomain("example.com", Some(true))
        .await
        .unwrap();

    assert!(envelope.success);
}

#[tokio::test]
async fn test_holehe_domains() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/holehe"))
        .and(query_param("email", "user@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"domains": ["github.com", "spotify.com"]}
        })))
        .mount(&server)
        .await;

    let envelope = client(&server).osint().holehe("user@example.com").await.unwrap();

    assert_eq!(envelope.into_data().unwrap().domains, vec!["github.com", "spotify.com"]);
}
