//! Client handlers (protected)

use crate::{
    error::AppError,
    middleware::AppState,
    models::client::{CreateClientRequest, UpdateClientRequest},
    repository::ClientRepository,
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

pub async fn list_clients(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ClientRepository::new(state.db.clone());
    let clients = repo.list().await?;

    Ok(Json(clients))
}

pub async fn get_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ClientRepository::new(state.db.clone());
    let client = repo.find_by_id(id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(client))
}

pub async fn create_client(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    rules::create_client().validate(&payload).await?;

    let req: CreateClientRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let repo = ClientRepository::new(state.db.clone());
    let client = repo.create(&req).await?;

    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn update_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    rules::update_client().validate(&payload).await?;

    let req: UpdateClientRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let repo = ClientRepository::new(state.db.clone());
    let client = repo.update(id, &req).await?;

    Ok(Json(client))
}

pub async fn delete_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ClientRepository::new(state.db.clone());
    repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
