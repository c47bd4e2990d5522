//! Placeholder authentication.
//!
//! There is no real credential store: a fixed in-memory user table is
//! consulted, passwords are compared as-is and the issued token is the
//! username itself. It exists so clients can exercise the bearer token
//! flow, not to protect anything.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::Error;

const INVALID_CREDENTIALS: &str = "Invalid authentication credentials";
const INCORRECT_LOGIN: &str = "Incorrect username or password";

#[derive(Clone, Debug, Serialize)]
pub struct User {
    pub username: String,
    pub full_name: String,
    pub email: String,
    #[serde(skip)]
    password: String,
    pub disabled: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Clone, Debug, Default)]
pub struct UserDirectory {
    users: HashMap<String, User>,
}

impl UserDirectory {
    /// A directory holding the single `testuser` demo account.
    pub fn with_demo_user() -> Self {
        Self::default().with_user(
            "testuser",
            "Test User",
            "test@example.com",
            "fakehashedpassword",
            false,
        )
    }

    pub fn with_user(
        mut self,
        username: &str,
        full_name: &str,
        email: &str,
        password: &str,
        disabled: bool,
    ) -> Self {
        self.users.insert(
            username.to_string(),
            User {
                username: username.to_string(),
                full_name: full_name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                disabled,
            },
        );
        self
    }

    /// Check a username and password and hand out a token.
    pub fn issue_token(&self, username: &str, password: &str) -> Result<Token, Error> {
        let user = self
            .users
            .get(username)
            .filter(|u| u.password == password)
            .ok_or_else(|| {
                tracing::warn!(username, "Authentication failed");
                Error::Unauthorized(INCORRECT_LOGIN.to_string())
            })?;

        tracing::info!(username, "Token issued");
        Ok(Token {
            access_token: user.username.clone(),
            token_type: "bearer".to_string(),
        })
    }

    /// Resolve a bearer token to an active user.
    pub fn user_for_token(&self, token: &str) -> Result<&User, Error> {
        let user = self.users.get(token).ok_or_else(|| {
            tracing::warn!("Token validation failed");
            Error::Unauthorized(INVALID_CREDENTIALS.to_string())
        })?;
        if user.disabled {
            tracing::warn!(username = %user.username, "Authentication attempt for disabled user");
            return Err(Error::InactiveUser);
        }
        Ok(user)
    }

    /// The error returned when no token was presented at all.
    pub fn missing_token() -> Error {
        Error::Unauthorized("Not authenticated".to_string())
    }
}
