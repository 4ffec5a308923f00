//! Identity endpoints: register, login, password reset
//!
//! Each handler runs its rule set against the raw payload first; the
//! service is only invoked once the payload passed every check.

use crate::{error::AppError, middleware::AppState, models::auth::*, validation::rules};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    rules::register(state.users.clone(), state.config.security.password_min_length)
        .validate(&payload)
        .await?;

    let req: RegisterRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let response = state.auth_service.register(req).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    rules::login().validate(&payload).await?;

    let req: LoginRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let response = state.auth_service.login(req).await?;

    Ok(Json(response))
}

pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    rules::forgot_password().validate(&payload).await?;

    let req: ForgotPasswordRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    state.auth_service.forgot_password(req).await?;

    Ok(Json(json!({"message": "Password reset link sent to your email."})))
}

pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    rules::reset_password(state.config.security.password_min_length)
        .validate(&payload)
        .await?;

    let req: ResetPasswordRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    state.auth_service.reset_password(&token, req).await?;

    Ok(Json(json!({"message": "Password updated successfully"})))
}
