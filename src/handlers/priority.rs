//! Priority handlers (protected)

use crate::{
    error::AppError,
    middleware::AppState,
    models::priority::{CreatePriorityRequest, UpdatePriorityRequest},
    repository::PriorityRepository,
    validation::rules,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

pub async fn list_priorities(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let repo = PriorityRepository::new(state.db.clone());
    let priorities = repo.list().await?;

    Ok(Json(priorities))
}

pub async fn get_priority(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let repo = PriorityRepository::new(state.db.clone());
    let priority = repo.find_by_id(id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(priority))
}

pub async fn create_priority(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    rules::create_priority().validate(&payload).await?;

    let req: CreatePriorityRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let repo = PriorityRepository::new(state.db.clone());
    let priority = repo.create(&req).await?;

    Ok((StatusCode::CREATED, Json(priority)))
}

pub async fn update_priority(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    rules::update_priority().validate(&payload).await?;

    let req: UpdatePriorityRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let repo = PriorityRepository::new(state.db.clone());
    let priority = repo.update(id, &req).await?;

    Ok(Json(priority))
}

pub async fn delete_priority(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let repo = PriorityRepository::new(state.db.clone());
    repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
