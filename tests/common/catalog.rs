//! Mock catalog API built on wiremock

use serde_json::Value;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mcr_rss::Config;

/// Artifact page root used by [`mock_config`]
pub const ARTIFACT_BASE: &str = "https://mcr.test/en-us/artifact/mar";

/// Catalog API root served by `mock_server`
pub fn catalog_base_url(mock_server: &MockServer) -> String {
    format!("{}/api/v1/catalog", mock_server.uri())
}

/// Config pointing the catalog at `mock_server`
pub fn mock_config(mock_server: &MockServer) -> Arc<Config> {
    Arc::new(Config {
        catalog_base_url: catalog_base_url(mock_server),
        artifact_base_url: ARTIFACT_BASE.to_string(),
        ..Default::default()
    })
}

/// Serve `body` with `status` for `GET /api/v1/catalog/{repo}/{resource}?reg=mar`
pub async fn mount_resource(
    mock_server: &MockServer,
    repo: &str,
    resource: &str,
    status: u16,
    body: Value,
) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/catalog/{}/{}", repo, resource)))
        .and(query_param("reg", "mar"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(mock_server)
        .await;
}

/// Serve both resources of a healthy repository
pub async fn mount_repository(mock_server: &MockServer, repo: &str, details: Value, tags: Value) {
    mount_resource(mock_server, repo, "details", 200, details).await;
    mount_resource(mock_server, repo, "tags", 200, tags).await;
}
