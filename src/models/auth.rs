//! Authentication-related DTOs

use crate::models::user::{Role, UserResponse};
use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// Defaults to GESTIONNAIRE when absent or unrecognized
    pub role: Option<String>,
}

/// Registration response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i32,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub role: Role,
    pub user: UserResponse,
}

/// Forgot-password request
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Reset-password request (token travels in the path)
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}
