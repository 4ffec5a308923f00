//! Health endpoints

use crate::{db, middleware::AppState};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

/// Liveness check
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness check: verifies the database is reachable
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match db::health_check(&state.db).await {
        db::HealthStatus::Healthy => {
            db::record_pool_metrics(&state.db);
            (StatusCode::OK, Json(json!({"status": "ready"})))
        }
        db::HealthStatus::Unhealthy(reason) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"status": "not ready", "reason": reason})),
        ),
    }
}
