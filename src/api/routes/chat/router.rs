//! Router for the chat API

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    middleware,
    routing::{get, post},
};

use super::public;
use crate::api::public::ApiError;
use crate::api::routes::auth::require_token;
use crate::api::state::AppState;
use crate::core::Error;

type SharedState = Arc<AppState>;

/// Run one chat turn against the inference backend
async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<public::ChatRequest>, JsonRejection>,
) -> Result<Json<public::ChatResponse>, ApiError> {
    // Every kind of unreadable body is a plain 400 for callers
    let Json(request) = payload.map_err(|e| Error::Validation(e.body_text()))?;
    let response = state.proxy.handle_chat(request).await?;
    Ok(Json(response))
}

/// Get the ordered history of a session
async fn chat_history(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<public::ChatHistoryResponse>, ApiError> {
    let history = state.proxy.get_history(&session_id).await?;
    Ok(Json(history))
}

/// Create the chat router
pub fn router(state: SharedState) -> Router<SharedState> {
    let require_auth = state.config.require_auth;
    let router = Router::new()
        .route("/chat", post(chat_handler))
        .route("/chat/", post(chat_handler))
        .route("/chat/history/{session_id}", get(chat_history));

    if require_auth {
        router.route_layer(middleware::from_fn_with_state(state, require_token))
    } else {
        router
    }
}
