//! Common test utilities for integration tests.
//!
//! Re-exports the fixture loader and wiremock types, and builds clients
//! pointed at a mock server. All integration tests should use these helpers
//! so the API key and base URL handling stay consistent.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Every client built here uses [`TEST_API_KEY`]
//!
//! # What this does NOT handle
//! - Mock setup (use wiremock directly in tests)

use std::time::Duration;

#[allow(unused_imports)]
pub use oathnet_client::testing::load_fixture;
#[allow(unused_imports)]
pub use oathnet_client::{ClientError, Envelope, OathNetClient};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key";

/// Poll interval short enough that job tests finish quickly on a real clock.
#[allow(dead_code)]
pub const FAST_POLL: Option<Duration> = Some(Duration::from_millis(10));

/// A client for `server` with the test key and no metrics.
#[allow(dead_code)]
pub fn client(server: &MockServer) -> OathNetClient {
    OathNetClient::builder()
        .api_key(TEST_API_KEY)
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client should build against mock server")
}

/// Query values recorded for `key` on the `index`th request the server received.
#[allow(dead_code)]
pub async fn query_values(server: &MockServer, index: usize, key: &str) -> Vec<String> {
    let requests = server
        .received_requests()
        .await
        .expect("request recording is enabled");
    requests[index]
        .url
        .query_pairs()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .collect()
}
