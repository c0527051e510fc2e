//! Success envelope shared by both services.
//!
//! Every successful response is `{"success": true, ...fields}`. Handlers
//! build a payload struct and wrap it in [`Success`] instead of writing
//! ad-hoc `json!` objects.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// `{ "success": true, ...T }` response envelope.
///
/// `T` must serialize as a JSON object; its fields are flattened next to
/// `success`.
///
/// ```ignore
/// Ok(Success::new(DeletedQuestion { deleted: id }))
/// ```
#[derive(Debug, Serialize)]
pub struct Success<T: Serialize> {
    success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> Success<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
