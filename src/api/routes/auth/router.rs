//! Router for the placeholder auth API

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::auth::UserDirectory;

type SharedState = Arc<AppState>;
type BearerHeader = Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>;

fn bearer_token(header: BearerHeader) -> Result<String, ApiError> {
    let TypedHeader(Authorization(bearer)) =
        header.map_err(|_| UserDirectory::missing_token())?;
    Ok(bearer.token().to_string())
}

/// Exchange a username and password for a token
async fn token_handler(
    State(state): State<SharedState>,
    Form(form): Form<public::TokenRequest>,
) -> Result<Json<public::Token>, ApiError> {
    tracing::info!(username = %form.username, "Token request received");
    let token = state.users.issue_token(&form.username, &form.password)?;
    Ok(Json(token))
}

/// Get the user the bearer token belongs to
async fn users_me(
    State(state): State<SharedState>,
    header: BearerHeader,
) -> Result<Json<public::User>, ApiError> {
    let token = bearer_token(header)?;
    let user = state.users.user_for_token(&token)?;
    tracing::info!(username = %user.username, "Accessing user info");
    Ok(Json(user.clone()))
}

/// Middleware rejecting requests without a valid bearer token
pub async fn require_token(
    State(state): State<SharedState>,
    header: BearerHeader,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(header)?;
    state.users.user_for_token(&token)?;
    Ok(next.run(request).await)
}

/// Create the auth router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/token", post(token_handler))
        .route("/users/me", get(users_me))
}
