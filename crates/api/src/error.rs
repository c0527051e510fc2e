//! Per-service error types and the shared failure envelope.
//!
//! Every failure response has the shape
//! `{"success": false, "error": <status>, "message": <text>}` with the HTTP
//! status equal to `error`. Messages are fixed per status; the detail carried
//! by each variant is only logged.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use brewquiz_core::error::CoreError;
use brewquiz_core::types::DbId;
use brewquiz_db::store::StoreError;
use serde_json::json;

use crate::auth::AuthError;

pub const MSG_BAD_REQUEST: &str = "Bad Request";
pub const MSG_NOT_FOUND: &str = "Resource not found";
pub const MSG_METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const MSG_TRIVIA_UNPROCESSABLE: &str = "Can not be processed";
pub const MSG_COFFEE_UNPROCESSABLE: &str = "unprocessable";
pub const MSG_INTERNAL: &str = "internal server error";

/// Build the failure envelope for `status`.
pub fn error_envelope(status: StatusCode, message: impl Into<String>) -> Response {
    let body = json!({
        "success": false,
        "error": status.as_u16(),
        "message": message.into(),
    });
    (status, Json(body)).into_response()
}

// ---------------------------------------------------------------------------
// Trivia
// ---------------------------------------------------------------------------

/// Errors returned by trivia handlers.
#[derive(Debug, thiserror::Error)]
pub enum TriviaError {
    /// Malformed input the store rejected, or a failed deletion.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or empty required field, or an unreadable body.
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Store failure on an endpoint with no more specific mapping.
    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

/// Convenience type alias for trivia handler return values.
pub type TriviaResult<T> = Result<T, TriviaError>;

impl From<JsonRejection> for TriviaError {
    fn from(rejection: JsonRejection) -> Self {
        TriviaError::Unprocessable(rejection.body_text())
    }
}

impl IntoResponse for TriviaError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            TriviaError::BadRequest(detail) => {
                tracing::debug!(%detail, "Bad request");
                (StatusCode::BAD_REQUEST, MSG_BAD_REQUEST)
            }
            TriviaError::NotFound(detail) => {
                tracing::debug!(%detail, "Not found");
                (StatusCode::NOT_FOUND, MSG_NOT_FOUND)
            }
            TriviaError::Unprocessable(detail) => {
                tracing::debug!(%detail, "Unprocessable request");
                (StatusCode::UNPROCESSABLE_ENTITY, MSG_TRIVIA_UNPROCESSABLE)
            }
            TriviaError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, MSG_METHOD_NOT_ALLOWED)
            }
            TriviaError::Store(err) => {
                tracing::error!(error = %err, "Trivia store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL)
            }
        };
        error_envelope(status, message)
    }
}

// ---------------------------------------------------------------------------
// Coffee shop
// ---------------------------------------------------------------------------

/// Errors returned by coffee-shop handlers.
#[derive(Debug, thiserror::Error)]
pub enum CoffeeShopError {
    #[error("Drink #{0} not found.")]
    DrinkNotFound(DbId),

    /// Unknown route or a path id that is not an integer.
    #[error("Not found")]
    NotFound,

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Store failure: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Convenience type alias for coffee-shop handler return values.
pub type CoffeeShopResult<T> = Result<T, CoffeeShopError>;

impl From<JsonRejection> for CoffeeShopError {
    fn from(rejection: JsonRejection) -> Self {
        CoffeeShopError::Unprocessable(rejection.body_text())
    }
}

impl From<CoreError> for CoffeeShopError {
    fn from(err: CoreError) -> Self {
        CoffeeShopError::Unprocessable(err.to_string())
    }
}

impl IntoResponse for CoffeeShopError {
    fn into_response(self) -> Response {
        match self {
            CoffeeShopError::DrinkNotFound(id) => {
                error_envelope(StatusCode::NOT_FOUND, format!("Drink #{id} not found."))
            }
            CoffeeShopError::NotFound => error_envelope(StatusCode::NOT_FOUND, MSG_NOT_FOUND),
            CoffeeShopError::Unprocessable(detail) => {
                tracing::debug!(%detail, "Unprocessable request");
                error_envelope(StatusCode::UNPROCESSABLE_ENTITY, MSG_COFFEE_UNPROCESSABLE)
            }
            CoffeeShopError::MethodNotAllowed => {
                error_envelope(StatusCode::METHOD_NOT_ALLOWED, MSG_METHOD_NOT_ALLOWED)
            }
            CoffeeShopError::Store(err) => {
                tracing::error!(error = %err, "Drink store failure");
                error_envelope(StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL)
            }
            CoffeeShopError::Auth(err) => err.into_response(),
        }
    }
}
