use axum::{
    http::{
        header::{self, HeaderValue},
        StatusCode,
    },
    response::{IntoResponse, Response},
    Extension, Json,
};
use common::{AppError, ErrorCode};
use content::ContentData;
use serde::Serialize;
use tracing::debug;

use crate::{app::AppState, context::RequestContextExtractor, errors::HttpError};

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    uptime_seconds: u64,
}

#[derive(Serialize)]
struct ReadyPayload<'a> {
    status: &'static str,
    api_url: &'a str,
    route_root: &'a str,
}

pub async fn health(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let uptime = state.launched_at().elapsed();
    Json(HealthPayload {
        status: "ok",
        uptime_seconds: uptime.as_secs(),
    })
}

pub async fn readiness(Extension(state): Extension<AppState>) -> Response {
    let loader = state.loader();
    Json(ReadyPayload {
        status: "ready",
        api_url: loader.source().base_url(),
        route_root: loader.route_root(),
    })
    .into_response()
}

pub async fn metrics(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let metrics = state.metrics_handle().render();
    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; version=0.0.4"),
        )],
        metrics,
    )
}

/// Hands the attached page and menu to the client as JSON.
pub async fn content(
    Extension(content): Extension<ContentData>,
    RequestContextExtractor(context): RequestContextExtractor,
) -> impl IntoResponse {
    debug!(
        request_id = %context.trace.request_id,
        path = %context.original_path,
        "serving attached content",
    );

    Json(content)
}

pub async fn not_found() -> Response {
    HttpError::from(AppError::new(ErrorCode::NotFound, "resource not found")).into_response()
}
