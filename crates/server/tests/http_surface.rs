mod support;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::IntoResponse,
    Extension,
};
use http_body_util::BodyExt;
use server::{build_router, handlers};
use tower::ServiceExt;

use support::test_state;

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let state = test_state("http://127.0.0.1:9", "/docs");

    let response = handlers::health(Extension(state)).await.into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    assert_eq!(payload.get("status").and_then(|v| v.as_str()), Some("ok"));
}

#[tokio::test]
async fn readiness_reports_normalized_configuration() {
    let state = test_state("http://127.0.0.1:9/api/", "/docs/");

    let response = handlers::readiness(Extension(state)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    assert_eq!(
        payload.get("api_url").and_then(|v| v.as_str()),
        Some("http://127.0.0.1:9/api")
    );
    assert_eq!(
        payload.get("route_root").and_then(|v| v.as_str()),
        Some("docs")
    );
}

#[tokio::test]
async fn unknown_paths_fall_back_to_json_not_found() {
    let app = build_router(test_state("http://127.0.0.1:9", "/docs"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/elsewhere")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = json_body(response).await;
    assert_eq!(
        payload.get("code").and_then(|v| v.as_str()),
        Some("not_found")
    );
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = build_router(test_state("http://127.0.0.1:9", "/docs"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn metrics_endpoint_renders_prometheus_text() {
    let app = build_router(test_state("http://127.0.0.1:9", "/docs"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/plain; version=0.0.4"
    );
}
