//! Integration tests using WireMock
//!
//! These tests drive the HTTP client and the workflow against a mock
//! SendPost server, covering URL construction, scope headers, request
//! bodies and error mapping.

mod client_tests;
mod workflow_tests;

use std::time::Duration;

use integrations_sendpost::{AuthScope, ScopedApiKey, SendPostClient};
use wiremock::MockServer;

/// Path prefix the mock server serves the API under.
pub const API_PREFIX: &str = "/api/v1";

/// Starts a mock server and a client pointed at it.
pub async fn setup() -> (MockServer, SendPostClient) {
    let server = MockServer::start().await;
    let client = SendPostClient::builder()
        .base_url(format!("{}{}", server.uri(), API_PREFIX))
        .timeout(Duration::from_secs(2))
        .build()
        .expect("Failed to build client");
    (server, client)
}

/// Full mock-server path for an endpoint.
pub fn api_path(endpoint: &str) -> String {
    format!("{}{}", API_PREFIX, endpoint)
}

/// An account-scope key.
pub fn account_key() -> ScopedApiKey {
    ScopedApiKey::new(AuthScope::Account, "test-account-key")
}

/// A sub-account-scope key.
pub fn sub_account_key() -> ScopedApiKey {
    ScopedApiKey::new(AuthScope::SubAccount, "test-sub-account-key")
}
