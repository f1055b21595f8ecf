//! Shared helpers for integration tests

#![allow(dead_code)]

use activity_hooks::{SigningIdentity, WebhookManager};
use serde_json::json;
use wiremock::matchers::{basic_auth, body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ENVIRONMENT: &str = "dev";
pub const CONSUMER_KEY: &str = "consumer-key";
pub const CONSUMER_SECRET: &str = "consumer-secret";
pub const BEARER_TOKEN: &str = "AAAA-test-bearer-token";

pub fn identity() -> SigningIdentity {
    SigningIdentity::new(CONSUMER_KEY, CONSUMER_SECRET, "access-token", "access-token-secret")
}

/// Manager pointed at a wiremock server
pub fn manager(server: &MockServer) -> WebhookManager {
    WebhookManager::builder()
        .base_url(server.uri())
        .environment(ENVIRONMENT)
        .identity(identity())
        .build()
        .unwrap()
}

/// Path of an environment-scoped endpoint
pub fn env_path(suffix: &str) -> String {
    format!("/1.1/account_activity/all/{}/{}", ENVIRONMENT, suffix)
}

pub fn bearer_header() -> String {
    format!("Bearer {}", BEARER_TOKEN)
}

/// Mount the credential exchange endpoint, expecting `calls` exchanges
pub async fn mount_token(server: &MockServer, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(basic_auth(CONSUMER_KEY, CONSUMER_SECRET))
        .and(body_string("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "bearer",
            "access_token": BEARER_TOKEN
        })))
        .expect(calls)
        .mount(server)
        .await;
}

/// Authorization header values of every request received on `request_path`
pub async fn authorization_headers(server: &MockServer, request_path: &str) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == request_path)
        .filter_map(|r| r.headers.get("authorization"))
        .filter_map(|v| v.to_str().ok().map(String::from))
        .collect()
}
