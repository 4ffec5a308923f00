//! Unified error model
//! Defines the application error taxonomy and the JSON error response format

use crate::validation::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller input failed one or more field checks. Carries the complete
    /// list, one entry per failing check.
    #[error("Validation failed")]
    Validation(Vec<ValidationError>),

    #[error("Configuration error: {0}")]
    Config(String),

    /// No credentials presented (missing or malformed Authorization header)
    #[error("Access denied, no token provided")]
    Unauthenticated,

    /// Login attempt with an unknown email or a wrong password. The two
    /// cases are indistinguishable to the caller.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Credentials presented but invalid or expired.
    #[error("Invalid or expired token")]
    Forbidden,

    #[error("Resource not found")]
    NotFound,

    /// Uniqueness violation on a field the caller supplied.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing error message (never leaks internals)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Validation failed".to_string(),
            AppError::Unauthenticated => "Access denied, no token provided".to_string(),
            AppError::InvalidCredentials => "Invalid email or password".to_string(),
            AppError::Forbidden => "Invalid or expired token".to_string(),
            AppError::NotFound => "Resource not found".to_string(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }

    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }
}

/// Error response DTO
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: u16,
    pub message: String,
    pub request_id: String,
}

/// Validation error response DTO. The complete list is returned, not just
/// the first failing field.
#[derive(Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<ValidationError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::Validation(errors) = self {
            tracing::debug!(count = errors.len(), "Request validation failed");
            return (status, Json(ValidationErrorResponse { errors })).into_response();
        }

        let request_id = uuid::Uuid::new_v4().to_string();
        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.code(),
                message: self.user_message(),
                request_id,
            },
        };

        // Full detail stays server-side
        tracing::error!(
            code = self.code(),
            message = %self,
            request_id = %error_response.error.request_id,
            "Application error"
        );

        (status, Json(error_response)).into_response()
    }
}

impl From<Vec<ValidationError>> for AppError {
    fn from(errors: Vec<ValidationError>) -> Self {
        AppError::Validation(errors)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}
