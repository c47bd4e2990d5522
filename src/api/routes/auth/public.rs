//! Public types for the auth API
use serde::Deserialize;

pub use crate::auth::{Token, User};

/// Form body of `POST /auth/token`
#[derive(Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}
