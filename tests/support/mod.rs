// ABOUTME: Test support utilities.
// ABOUTME: Provides JSON fixtures and a mock GitHub API for integration tests.

#![allow(dead_code)]

use github_deployments::config::Config;
use serde_json::{Value, json};
use std::sync::Once;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const REPO: &str = "acme/widgets";
pub const TOKEN: &str = "test-token";
pub const DEPLOYMENTS_PATH: &str = "/repos/acme/widgets/deployments";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("github_deployments=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Config pointing at the mock server.
pub fn config(server: &MockServer) -> Config {
    Config::new(Some(REPO), Some(TOKEN))
        .unwrap()
        .api_url(server.uri())
}

pub fn statuses_path(id: u64) -> String {
    format!("{DEPLOYMENTS_PATH}/{id}/statuses")
}

pub fn deployment_json(id: u64) -> Value {
    json!({
        "id": id,
        "url": format!("https://api.github.com/repos/acme/widgets/deployments/{id}"),
        "sha": "0123456789abcdef0123456789abcdef01234567",
        "ref": "main",
        "environment": "production",
        "created_at": "2024-05-01T12:00:00Z",
        "creator": { "login": "octocat" },
        "payload": {}
    })
}

pub fn status_json(id: u64, state: &str) -> Value {
    json!({
        "id": id,
        "state": state,
        "created_at": "2024-05-02T08:30:00Z",
        "description": format!("{state} status"),
        "creator": { "login": "octocat" }
    })
}

/// Serve `GET /deployments` with the given ids.
pub async fn mount_deployments(server: &MockServer, ids: &[u64]) {
    let body: Vec<Value> = ids.iter().map(|id| deployment_json(*id)).collect();
    Mock::given(method("GET"))
        .and(path(DEPLOYMENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serve the last status of a deployment; `None` means it has no statuses.
pub async fn mount_last_status(server: &MockServer, id: u64, state: Option<&str>) {
    let body = match state {
        Some(state) => json!([status_json(id * 100, state)]),
        None => json!([]),
    };
    Mock::given(method("GET"))
        .and(path(statuses_path(id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
