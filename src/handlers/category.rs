//! Category handlers (protected)

use crate::{
    error::AppError,
    middleware::AppState,
    models::category::{CreateCategoryRequest, UpdateCategoryRequest},
    repository::CategoryRepository,
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

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo.list().await?;

    Ok(Json(categories))
}

pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.find_by_id(id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(category))
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    rules::create_category().validate(&payload).await?;

    let req: CreateCategoryRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.create(&req).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    rules::update_category().validate(&payload).await?;

    let req: UpdateCategoryRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.update(id, &req).await?;

    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CategoryRepository::new(state.db.clone());
    repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
