//! Health check API integration tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

mod common;
use common::{create_test_app_state, InMemoryUserStore, ManualClock};

#[tokio::test]
async fn test_health_endpoint() {
    let state = create_test_app_state(InMemoryUserStore::new(), ManualClock::starting_now());
    let app = complaint_service::routes::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_health_endpoint_is_public() {
    let state = create_test_app_state(InMemoryUserStore::new(), ManualClock::starting_now());
    let app = complaint_service::routes::create_router(state);

    // No Authorization header: must still answer
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_response_carries_tracking_headers() {
    let state = create_test_app_state(InMemoryUserStore::new(), ManualClock::starting_now());
    let app = complaint_service::routes::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-trace-id", "trace-from-caller")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-trace-id").unwrap(),
        "trace-from-caller"
    );
    assert!(response.headers().get("x-request-id").is_some());
}
