//! Error types for Telinv server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::equipment::ValidationReport;

/// Application error codes exposed in error responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchRecord = 4,
    Duplicate = 5,
    BadValue = 6,
    FieldTooLong = 7,
    NotActionable = 8,
    SerialRejected = 9,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Field too long: {0}")]
    FieldTooLong(String),

    #[error("Not actionable: {0}")]
    NotActionable(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Serial validation failed for {} serial number(s)", .0.validation_errors.len())]
    SerialValidation(ValidationReport),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The batch intake report keeps its own body shape so callers receive
        // every offending serial with its full reason set.
        if let AppError::SerialValidation(report) = self {
            return (StatusCode::BAD_REQUEST, Json(report)).into_response();
        }

        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchRecord, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::FieldTooLong(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::FieldTooLong, msg.clone())
            }
            AppError::NotActionable(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::NotActionable, msg.clone())
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::SerialValidation(_) => unreachable!("handled above"),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    /// Map structural field-check failures (stage one of the validation
    /// pipeline). Rules tagged with code `too_long` carry their own error
    /// kind; everything else is a plain validation failure.
    fn from(errors: validator::ValidationErrors) -> Self {
        for (field, field_errors) in errors.field_errors() {
            if let Some(err) = field_errors.first() {
                let message = err
                    .message
                    .clone()
                    .map(|m| m.into_owned())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                if err.code == "too_long" {
                    return AppError::FieldTooLong(message);
                }
                return AppError::Validation(message);
            }
        }
        AppError::Validation("invalid input".to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
