/*
 * Responsibility
 * - Application-wide AppError
 * - IntoResponse (HTTP status / JSON body per failure class)
 * - Convert repo errors into the same taxonomy (detail logged, not exposed)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::repos::error::RepoError;

/// Generic body for failures that must not leak detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    MissingCredential,
    #[error("invalid token")]
    InvalidCredential,
    #[error("invalid username or password")]
    InvalidLogin,
    #[error("validation failed: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }
}

/// Response for anything that reached the process boundary unhandled.
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": INTERNAL_ERROR_MESSAGE })),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MissingCredential => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Unauthorized" })),
            )
                .into_response(),
            AppError::InvalidCredential => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Invalid token" })),
            )
                .into_response(),
            AppError::InvalidLogin => (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "success": false,
                    "message": "Invalid username or password",
                })),
            )
                .into_response(),
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "errors": errors })),
            )
                .into_response(),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "success": false,
                    "message": format!("{resource} not found"),
                })),
            )
                .into_response(),
            AppError::Internal => internal_error_response(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        // Detail stays in the log; the client only sees the generic envelope
        tracing::error!(error = %e, "user store failure");
        AppError::Internal
    }
}
