//! Route wiring
//!
//! Three groups: health probes, the public identity endpoints under /auth,
//! and the protected resource API under /api. The bearer-token gate is
//! layered onto the /api group only, so ordering here is load-bearing.

use crate::{
    auth::middleware::require_auth,
    handlers::{auth, category, client, complaint, health, priority, user},
    middleware::{request_tracking_middleware, AppState},
};
use axum::{
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// JSON 404 for unmatched paths
async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Route not found"})))
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password/{token}", post(auth::reset_password));

    let protected = Router::new()
        .route("/api/users", get(user::list_users).post(user::create_user))
        .route(
            "/api/users/{id}",
            get(user::get_user)
                .put(user::update_user)
                .delete(user::delete_user),
        )
        .route(
            "/api/clients",
            get(client::list_clients).post(client::create_client),
        )
        .route(
            "/api/clients/{id}",
            get(client::get_client)
                .put(client::update_client)
                .delete(client::delete_client),
        )
        .route(
            "/api/categories",
            get(category::list_categories).post(category::create_category),
        )
        .route(
            "/api/categories/{id}",
            get(category::get_category)
                .put(category::update_category)
                .delete(category::delete_category),
        )
        .route(
            "/api/priorities",
            get(priority::list_priorities).post(priority::create_priority),
        )
        .route(
            "/api/priorities/{id}",
            get(priority::get_priority)
                .put(priority::update_priority)
                .delete(priority::delete_priority),
        )
        .route(
            "/api/complaints",
            get(complaint::list_complaints).post(complaint::create_complaint),
        )
        .route(
            "/api/complaints/{id}",
            get(complaint::get_complaint)
                .put(complaint::update_complaint)
                .delete(complaint::delete_complaint),
        )
        .layer(from_fn_with_state(
            state.token_service.clone(),
            require_auth,
        ));

    public
        .merge(protected)
        .fallback(route_not_found)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(from_fn(request_tracking_middleware))
        .with_state(state)
}
