//! Identity API integration tests
//!
//! Exercises the register / login / protected-route / expiry lifecycle
//! against the real router, with an in-memory credential store and a
//! manually driven clock.

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
use tower::ServiceExt;

mod common;
use common::{create_test_app_state, create_test_user, InMemoryUserStore, ManualClock};

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_register_success() {
    let users = InMemoryUserStore::new();
    let state = create_test_app_state(users.clone(), ManualClock::starting_now());
    let app = create_router(state);

    let response = app
        .oneshot(post_json(
            "/auth/register",
            json!({"email": "new@example.com", "password": "secret123"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "User registered successfully");
    assert!(json["userId"].is_number());
    assert_eq!(users.user_count(), 1);
}

#[tokio::test]
async fn test_register_duplicate_email_rejected() {
    let users = InMemoryUserStore::new();
    create_test_user(&users, "taken@example.com", "secret123", Role::Gestionnaire).await;

    let state = create_test_app_state(users.clone(), ManualClock::starting_now());
    let app = create_router(state);

    let response = app
        .oneshot(post_json(
            "/auth/register",
            json!({"email": "taken@example.com", "password": "secret123"}),
        ))
        .await
        .unwrap();

    // Caught by the async uniqueness check, reported as a field error
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors[0]["field"], "email");
    assert_eq!(errors[0]["message"], "Email is already in use");

    // The rejected attempt must not have touched the store
    assert_eq!(users.user_count(), 1);
}

#[tokio::test]
async fn test_register_validation_reports_all_invalid_fields() {
    let users = InMemoryUserStore::new();
    let state = create_test_app_state(users, ManualClock::starting_now());
    let app = create_router(state);

    // Both fields invalid: both must be reported in one response
    let response = app
        .oneshot(post_json(
            "/auth/register",
            json!({"email": "not-an-email", "password": "abc"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);

    let fields: Vec<&str> = errors.iter().map(|e| e["field"].as_str().unwrap()).collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"password"));
}

#[tokio::test]
async fn test_login_success() {
    let users = InMemoryUserStore::new();
    create_test_user(&users, "user@example.com", "secret123", Role::Admin).await;

    let state = create_test_app_state(users, ManualClock::starting_now());
    let app = create_router(state);

    let response = app
        .oneshot(post_json(
            "/auth/login",
            json!({"email": "user@example.com", "password": "secret123"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Login successful");
    assert!(json["token"].is_string());
    assert_eq!(json["role"], "ADMIN");
    assert_eq!(json["user"]["email"], "user@example.com");
    assert!(json["user"]["password_hash"].is_null());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let users = InMemoryUserStore::new();
    create_test_user(&users, "user@example.com", "secret123", Role::Gestionnaire).await;

    let state = create_test_app_state(users, ManualClock::starting_now());
    let app = create_router(state);

    let response = app
        .oneshot(post_json(
            "/auth/login",
            json!({"email": "user@example.com", "password": "wrong-password"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let users = InMemoryUserStore::new();
    let state = create_test_app_state(users, ManualClock::starting_now());
    let app = create_router(state);

    let response = app
        .oneshot(post_json(
            "/auth/login",
            json!({"email": "nobody@example.com", "password": "secret123"}),
        ))
        .await
        .unwrap();

    // Indistinguishable from a wrong password
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let users = InMemoryUserStore::new();
    let state = create_test_app_state(users, ManualClock::starting_now());
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_non_bearer_scheme() {
    let users = InMemoryUserStore::new();
    let state = create_test_app_state(users, ManualClock::starting_now());
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_garbage_token() {
    let users = InMemoryUserStore::new();
    let state = create_test_app_state(users, ManualClock::starting_now());
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_full_lifecycle_register_login_access_expire() {
    let users = InMemoryUserStore::new();
    let clock = ManualClock::starting_now();
    let state = create_test_app_state(users, clock.clone());
    let app = create_router(state.clone());

    // Register
    let response = app
        .clone()
        .oneshot(post_json(
            "/auth/register",
            json!({"email": "flow@example.com", "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Login
    let response = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            json!({"email": "flow@example.com", "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let token = json["token"].as_str().unwrap().to_string();

    // Token opens the protected route
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["users"][0]["email"], "flow@example.com");

    // Advance past the configured lifetime: the same token is now rejected
    clock.advance(Duration::seconds(
        state.config.security.access_token_exp_secs as i64,
    ));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_reset_token_rejected_on_protected_routes() {
    let users = InMemoryUserStore::new();
    let user = create_test_user(&users, "user@example.com", "secret123", Role::Gestionnaire).await;

    let state = create_test_app_state(users, ManualClock::starting_now());
    let reset_token = state
        .token_service
        .issue(user.id, Role::Gestionnaire, TokenPurpose::Reset, Duration::hours(1))
        .unwrap();

    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .header(header::AUTHORIZATION, format!("Bearer {}", reset_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_forgot_password_known_and_unknown_email() {
    let users = InMemoryUserStore::new();
    create_test_user(&users, "user@example.com", "secret123", Role::Gestionnaire).await;

    let state = create_test_app_state(users, ManualClock::starting_now());
    let app = create_router(state);

    let response = app
        .clone()
        .oneshot(post_json(
            "/auth/forgot-password",
            json!({"email": "user@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Password reset link sent to your email.");

    let response = app
        .oneshot(post_json(
            "/auth/forgot-password",
            json!({"email": "nobody@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reset_password_flow() {
    let users = InMemoryUserStore::new();
    let user = create_test_user(&users, "user@example.com", "old-secret", Role::Gestionnaire).await;

    let state = create_test_app_state(users, ManualClock::starting_now());
    let reset_token = state
        .token_service
        .issue(user.id, Role::Gestionnaire, TokenPurpose::Reset, Duration::hours(1))
        .unwrap();

    let app = create_router(state);

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/auth/reset-password/{}", reset_token),
            json!({"password": "new-secret"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Old password no longer works
    let response = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            json!({"email": "user@example.com", "password": "old-secret"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // New password does
    let response = app
        .oneshot(post_json(
            "/auth/login",
            json!({"email": "user@example.com", "password": "new-secret"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_reset_password_rejects_access_token() {
    let users = InMemoryUserStore::new();
    let user = create_test_user(&users, "user@example.com", "secret123", Role::Gestionnaire).await;

    let state = create_test_app_state(users, ManualClock::starting_now());
    let access_token = state
        .token_service
        .issue(user.id, Role::Gestionnaire, TokenPurpose::Access, Duration::hours(1))
        .unwrap();

    let app = create_router(state);

    let response = app
        .oneshot(post_json(
            &format!("/auth/reset-password/{}", access_token),
            json!({"password": "new-secret"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
