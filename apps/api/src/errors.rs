use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::contact::NotifyError;
use crate::render::CompileError;
use crate::resume::source::SourceError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::RateLimited(msg) => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", msg.clone())
            }
            AppError::Source(e) => {
                tracing::error!("Source error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SOURCE_ERROR",
                    "Failed to read resume data".to_string(),
                )
            }
            AppError::Compile(e) => {
                tracing::error!("LaTeX compilation error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "COMPILE_ERROR",
                    "Failed to generate resume PDF".to_string(),
                )
            }
            AppError::Notify(e) => {
                tracing::error!("Contact notification error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "NOTIFY_ERROR",
                    "Failed to send message. Please try again later.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
