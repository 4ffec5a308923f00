//! User management API integration tests

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::Duration;
use complaint_service::auth::jwt::TokenPurpose;
use complaint_service::models::user::Role;
use complaint_service::routes::create_router;
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

mod common;
use common::{create_test_app_state, create_test_user, InMemoryUserStore, ManualClock};

struct TestApi {
    app: axum::Router,
    token: String,
    admin_id: i32,
    users: Arc<InMemoryUserStore>,
}

/// Router plus a valid admin token to open the protected routes
async fn authenticated_api() -> TestApi {
    let users = InMemoryUserStore::new();
    let admin = create_test_user(&users, "admin@example.com", "secret123", Role::Admin).await;

    let state = create_test_app_state(users.clone(), ManualClock::starting_now());
    let token = state
        .token_service
        .issue(admin.id, Role::Admin, TokenPurpose::Access, Duration::hours(1))
        .unwrap();

    TestApi {
        app: create_router(state),
        token,
        admin_id: admin.id,
        users,
    }
}

fn request(method: &str, uri: &str, token: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_users() {
    let api = authenticated_api().await;

    let response = api
        .app
        .oneshot(request("GET", "/api/users", &api.token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["users"][0]["email"], "admin@example.com");
    assert!(json["users"][0]["password_hash"].is_null());
}

#[tokio::test]
async fn test_get_user_found_and_missing() {
    let api = authenticated_api().await;

    let response = api
        .app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/users/{}", api.admin_id),
            &api.token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["email"], "admin@example.com");
    assert_eq!(json["role"], "ADMIN");

    let response = api
        .app
        .oneshot(request("GET", "/api/users/9999", &api.token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_user() {
    let api = authenticated_api().await;

    let response = api
        .app
        .oneshot(request(
            "POST",
            "/api/users",
            &api.token,
            Some(json!({"email": "manager@example.com", "password": "secret123", "role": "GESTIONNAIRE"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["email"], "manager@example.com");
    assert_eq!(json["role"], "GESTIONNAIRE");
    assert_eq!(api.users.user_count(), 2);
}

#[tokio::test]
async fn test_update_user_email() {
    let api = authenticated_api().await;

    let response = api
        .app
        .oneshot(request(
            "PUT",
            &format!("/api/users/{}", api.admin_id),
            &api.token,
            Some(json!({"email": "renamed@example.com"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["email"], "renamed@example.com");
}

#[tokio::test]
async fn test_update_user_keeping_own_email_is_allowed() {
    let api = authenticated_api().await;

    // Resubmitting the current email must not trip the uniqueness check
    let response = api
        .app
        .oneshot(request(
            "PUT",
            &format!("/api/users/{}", api.admin_id),
            &api.token,
            Some(json!({"email": "admin@example.com", "role": "ADMIN"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_user_to_taken_email_rejected() {
    let api = authenticated_api().await;
    let other = create_test_user(&api.users, "other@example.com", "secret123", Role::Gestionnaire)
        .await;

    let response = api
        .app
        .oneshot(request(
            "PUT",
            &format!("/api/users/{}", other.id),
            &api.token,
            Some(json!({"email": "admin@example.com"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["field"], "email");
    assert_eq!(json["errors"][0]["message"], "Email is already in use");
}

#[tokio::test]
async fn test_delete_user() {
    let api = authenticated_api().await;
    let victim = create_test_user(&api.users, "victim@example.com", "secret123", Role::Gestionnaire)
        .await;

    let response = api
        .app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/users/{}", victim.id),
            &api.token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(api.users.user_count(), 1);

    let response = api
        .app
        .oneshot(request(
            "DELETE",
            &format!("/api/users/{}", victim.id),
            &api.token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
