//! HTTP error mapping.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

const UNIQUE_CONFLICT: &str = "Resource already exists";

/// Errors returned by HTTP handlers.
///
/// Every variant renders as `{"error": "<message>"}` with the matching status.
#[derive(Debug)]
pub enum ApiError {
    Internal(people_core::Error),
    NotFound(String),
    BadRequest(String),
    Conflict(String),
}

impl From<people_core::Error> for ApiError {
    fn from(err: people_core::Error) -> Self {
        match &err {
            e if e.is_not_found() => ApiError::NotFound(err.to_string()),
            people_core::Error::PersonExists { .. } => ApiError::Conflict(err.to_string()),
            people_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            // Storage text names tables and indexes; keep it out of the response.
            people_core::Error::Database(sqlx::Error::Database(db_err))
                if db_err.is_unique_violation() =>
            {
                ApiError::Conflict(UNIQUE_CONFLICT.to_string())
            }
            _ => ApiError::Internal(err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Internal(err) => {
                tracing::error!(
                    subsystem = "api",
                    component = "error",
                    error = %err,
                    "Request failed"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
