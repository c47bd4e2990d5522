//! Error type shared by the session store, the chat proxy and the API
//! layer.

use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or empty inbound request
    #[error("{0}")]
    Validation(String),

    /// The inference backend answered with a non-success status
    #[error("Ollama service error: {status} - {body}")]
    UpstreamStatus { status: StatusCode, body: String },

    /// The inference backend could not be reached or timed out
    #[error("Could not connect to Ollama service: {0}")]
    UpstreamUnavailable(String),

    /// The backend succeeded but produced no usable content
    #[error("LLM failed to generate a response.")]
    EmptyReply,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Unauthorized(String),

    #[error("Inactive user")]
    InactiveUser,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::InactiveUser => StatusCode::BAD_REQUEST,
            Error::UpstreamStatus { .. } => StatusCode::BAD_GATEWAY,
            Error::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::EmptyReply | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    /// The message shown to API callers. Internal failures are logged in
    /// full but only summarized for the caller.
    pub fn detail(&self) -> String {
        match self {
            Error::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            Error::Validation("empty".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::UpstreamStatus {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "boom".into()
            }
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            Error::UpstreamUnavailable("refused".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(Error::EmptyReply.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            Error::NotFound {
                entity: "Session",
                id: "s1".into()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_upstream_detail_carries_status_and_body() {
        let err = Error::UpstreamStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".into(),
        };
        assert_eq!(
            err.detail(),
            "Ollama service error: 500 Internal Server Error - boom"
        );
    }

    #[test]
    fn test_internal_detail_is_generic() {
        let err = Error::Internal("expected value at line 1 column 1".into());
        assert_eq!(err.detail(), "An internal error occurred");
    }
}
