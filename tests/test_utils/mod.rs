//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, header},
};
use serde_json::Value;

use llm_gateway::api::AppState;
use llm_gateway::api::app;
use llm_gateway::core::AppConfig;

/// An address nothing listens on, for simulating an unreachable backend.
pub const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:1";

/// Config pointing at `ollama_api_url` with the model fixed to `m`.
pub fn test_config(ollama_api_url: &str) -> AppConfig {
    AppConfig {
        ollama_api_url: ollama_api_url.to_string(),
        model: String::from("m"),
        request_timeout: Duration::from_secs(5),
        ..AppConfig::default()
    }
}

/// Creates a test application router with its own empty session store.
/// Clone the router to send several requests against the same state.
pub fn test_app(config: AppConfig) -> Router {
    app(Arc::new(AppState::from_config(config)))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

pub async fn body_to_json(body: Body) -> Value {
    let body = body_to_string(body).await;
    serde_json::from_str(&body).unwrap_or_else(|e| panic!("Invalid JSON body {body}: {e}"))
}

pub fn post_json(uri: &str, json: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Ollama `/api/chat` success body replying with `content`.
pub fn ollama_reply(content: &str) -> String {
    serde_json::json!({
        "model": "m",
        "created_at": "2023-10-26T10:00:00Z",
        "message": {
            "role": "assistant",
            "content": content
        },
        "done": true
    })
    .to_string()
}
