//! HTTP error mapping
//!
//! Every error body carries a `msg`; internal errors also echo the payload
//! that failed to persist.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gsender_core::Error as CoreError;
use gsender_shortcuts::Collision;
use gsender_store::StoreError;
use serde_json::json;

/// Error returned by handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A record API error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A direct store access failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A shortcut set binds one combination to several active shortcuts.
    #[error("Shortcut keys are assigned more than once")]
    ShortcutConflict(Vec<Collision>),
}

/// Handler result alias
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Core(CoreError::BadRequest(msg)) => (StatusCode::BAD_REQUEST, json!({ "msg": msg })),
            ApiError::Core(CoreError::NotFound { entity, id }) => {
                tracing::debug!(entity, %id, "Record not found");
                (StatusCode::NOT_FOUND, json!({ "msg": "Not found" }))
            }
            ApiError::Core(CoreError::Internal { message, payload }) => {
                tracing::error!(error = %message, "Internal error");
                let body = match payload {
                    Some(payload) => json!({ "msg": message, "payload": payload }),
                    None => json!({ "msg": message }),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
            ApiError::Core(CoreError::Controller(e)) => {
                tracing::error!(error = %e, "Controller error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "msg": e.to_string() }))
            }
            ApiError::ShortcutConflict(conflicts) => {
                tracing::debug!(count = conflicts.len(), "Rejected conflicting shortcut set");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "msg": "Shortcut keys are assigned more than once", "conflicts": conflicts }),
                )
            }
            ApiError::Store(e) => {
                tracing::error!(error = %e, "Store error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "msg": e.to_string() }))
            }
        };
        (status, Json(body)).into_response()
    }
}
