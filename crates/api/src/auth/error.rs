//! Errors raised by the bearer-token gate.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::error_envelope;

/// A gate failure carrying the status and description clients receive.
///
/// `code` is a machine-readable reason kept for logs; the response body only
/// exposes `description` as the envelope `message`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {description}")]
pub struct AuthError {
    pub status: StatusCode,
    pub code: &'static str,
    pub description: String,
}

impl AuthError {
    fn new(status: StatusCode, code: &'static str, description: &str) -> Self {
        Self {
            status,
            code,
            description: description.to_string(),
        }
    }

    pub fn header_missing() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "authorization_header_missing",
            "Authorization header is expected.",
        )
    }

    pub fn not_bearer() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "invalid_header",
            "Authorization header must start with \"Bearer\".",
        )
    }

    pub fn token_missing() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "invalid_header", "Token not found.")
    }

    pub fn malformed_header() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "invalid_header",
            "Authorization header must be bearer token.",
        )
    }

    pub fn unparseable_header() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "invalid_header",
            "Unable to parse authentication token.",
        )
    }

    pub fn unparseable_token() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "invalid_header",
            "Unable to parse authentication token.",
        )
    }

    pub fn key_not_found() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "invalid_header",
            "Unable to find the appropriate key.",
        )
    }

    pub fn expired() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "token_expired", "Token expired.")
    }

    pub fn incorrect_claims() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "invalid_claims",
            "Incorrect claims. Please, check the audience and issuer.",
        )
    }

    pub fn permissions_missing() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "invalid_claims",
            "Permissions not included in JWT.",
        )
    }

    pub fn permission_denied() -> Self {
        Self::new(StatusCode::FORBIDDEN, "unauthorized", "Permission not found.")
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!(code = self.code, status = %self.status, "Auth gate rejected request");
        error_envelope(self.status, self.description)
    }
}
