use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fansite_core::error::CoreError;
use serde_json::json;

/// Error type returned by every handler.
///
/// Domain failures arrive as [`CoreError`]; the other variants cover
/// request-shape problems and unexpected failures in the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Malformed request (bad JSON, wrong field types, bad query string).
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl AppError {
    /// Status, machine-readable code and client-facing message.
    ///
    /// Store and internal failures are logged here and replaced by a
    /// generic message so backend details never reach the client.
    fn classify(&self) -> (StatusCode, &'static str, String) {
        let core = match self {
            AppError::Core(core) => core,
            AppError::BadRequest(msg) => {
                return (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone());
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Unhandled API error");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.into(),
                );
            }
        };

        match core {
            CoreError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            CoreError::Persistence(msg) => {
                tracing::error!(error = %msg, "Store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_ERROR",
                    "Storage is temporarily unavailable".into(),
                )
            }
            CoreError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal domain error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.into(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();
        let body = json!({
            "success": false,
            "error": message,
            "code": code,
        });
        (status, axum::Json(body)).into_response()
    }
}
