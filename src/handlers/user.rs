//! User management handlers (protected)

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::user::*,
    repository::UserChanges,
    validation::rules,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let users = state.users.list().await?;

    let responses: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(json!({
        "users": responses,
        "count": responses.len(),
    })))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.users.find_by_id(id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    rules::register(state.users.clone(), state.config.security.password_min_length)
        .validate(&payload)
        .await?;

    let req: CreateUserRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let role = req.role.as_deref().map(Role::from).unwrap_or(Role::Gestionnaire);
    let password_hash = state.hasher.hash(&req.password)?;

    let user = state
        .users
        .create(crate::repository::NewUser { email: req.email, password_hash, role })
        .await?;

    tracing::info!(actor = auth_context.user_id, user_id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i32>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    rules::update_user(state.users.clone(), id, state.config.security.password_min_length)
        .validate(&payload)
        .await?;

    let req: UpdateUserRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let password_hash = match &req.password {
        Some(password) => Some(state.hasher.hash(password)?),
        None => None,
    };

    let changes = UserChanges {
        email: req.email,
        password_hash,
        role: req.role.as_deref().map(Role::from),
    };

    let user = state.users.update(id, changes).await?;

    tracing::info!(actor = auth_context.user_id, user_id = user.id, "User updated");

    Ok(Json(UserResponse::from(user)))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    state.users.delete(id).await?;

    tracing::info!(actor = auth_context.user_id, user_id = id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
