use super::mocks::MockGenerativeClient;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use gemini_proxy::{
    config::{Config, GeminiConfig, LogsConfig, ServerConfig},
    gemini::GenerativeClient,
    server::{handlers::AppState, router},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

pub const ROUTE: &str = "/api/call-gemini";

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        gemini: GeminiConfig {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: Some("test-key".to_string()),
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            route: ROUTE.to_string(),
            body_limit_bytes: 1024 * 1024,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
    }
}

/// Router backed by the given mock, or by no client at all (missing API key)
pub fn create_test_app(mock: Option<Arc<MockGenerativeClient>>) -> Router {
    let state = AppState {
        generator: mock.map(|m| m as Arc<dyn GenerativeClient>),
    };
    router(state, ROUTE, 1024 * 1024)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send a request and decode the JSON response body
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
gemini:
  base_url: "http://localhost:9999"
  api_key: "yaml-key"
server:
  host: "127.0.0.1"
  port: 3000
  route: "/generate"
  body_limit_bytes: 2048
  logs:
    level: "debug"
"#;
