use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use peerline_core::error::CoreError;
use serde_json::json;

/// Handler-level error type.
///
/// Everything a handler can fail with funnels into this enum and renders as
/// a `{"error", "code"}` JSON body with the appropriate status.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Map a domain error to its wire representation.
///
/// Validation failures and lost claim races are both 422: the request was
/// well-formed but the state of the world rejected it.
fn map_core_error(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} not found"),
        ),
        CoreError::Validation(msg) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "VALIDATION_ERROR",
            msg.clone(),
        ),
        CoreError::Conflict(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal_error()
        }
    }
}

/// Map a sqlx error, recognizing the unique-violation case.
///
/// A `23505` on one of our `uq_`-prefixed constraints is a user-visible
/// duplicate (e.g. a taken username) and renders as 422; any other database
/// failure is logged and sanitized down to a 500.
fn map_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some("23505")
                && db_err.constraint().is_some_and(|c| c.starts_with("uq_")) =>
        {
            let constraint = db_err.constraint().unwrap_or("unknown");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                "CONFLICT",
                format!("Duplicate value violates unique constraint: {constraint}"),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_error()
        }
    }
}

fn internal_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => map_core_error(core),
            AppError::Database(err) => map_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
