//! API routes module

pub mod auth;
pub mod chat;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::api::state::AppState;

type SharedState = Arc<AppState>;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Create the combined API router
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        // Chat routes, optionally behind a bearer token
        .merge(chat::router(state))
        // Placeholder token issuing and lookup
        .nest("/auth", auth::router())
        // Liveness probe
        .route("/health", get(health))
}
