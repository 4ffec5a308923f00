//! Complaint handlers (protected)

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::complaint::{CreateComplaintRequest, UpdateComplaintRequest},
    repository::ComplaintRepository,
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

pub async fn list_complaints(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ComplaintRepository::new(state.db.clone());
    let complaints = repo.list().await?;

    Ok(Json(complaints))
}

pub async fn get_complaint(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ComplaintRepository::new(state.db.clone());
    let complaint = repo.find_by_id(id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(complaint))
}

pub async fn create_complaint(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    rules::create_complaint().validate(&payload).await?;

    let req: CreateComplaintRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let repo = ComplaintRepository::new(state.db.clone());
    let complaint = repo.create(&req).await?;

    tracing::info!(actor = auth_context.user_id, complaint_id = complaint.id, "Complaint filed");

    Ok((StatusCode::CREATED, Json(complaint)))
}

pub async fn update_complaint(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    rules::update_complaint().validate(&payload).await?;

    let req: UpdateComplaintRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let repo = ComplaintRepository::new(state.db.clone());
    let complaint = repo.update(id, &req).await?;

    Ok(Json(complaint))
}

pub async fn delete_complaint(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ComplaintRepository::new(state.db.clone());
    repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
