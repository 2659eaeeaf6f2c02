use std::{sync::Arc, time::Instant};

use axum::{http::Request, middleware, response::Response, routing::get, Router};
use content::ContentLoader;
use metrics::{histogram, increment_counter};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::{
    classify::ServerErrorsFailureClass,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info_span, Span};

use crate::{handlers, middleware::attach_content};

#[derive(Clone)]
pub struct AppState(Arc<StateInner>);

struct StateInner {
    loader: ContentLoader,
    metrics: PrometheusHandle,
    launched_at: Instant,
}

impl AppState {
    pub fn new(loader: ContentLoader, metrics: PrometheusHandle, launched_at: Instant) -> Self {
        Self(Arc::new(StateInner {
            loader,
            metrics,
            launched_at,
        }))
    }

    pub fn loader(&self) -> &ContentLoader {
        &self.0.loader
    }

    pub fn metrics_handle(&self) -> &PrometheusHandle {
        &self.0.metrics
    }

    pub fn launched_at(&self) -> Instant {
        self.0.launched_at
    }
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("unknown")
                .to_string();

            info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
                status = tracing::field::Empty,
                latency_ms = tracing::field::Empty,
            )
        })
        .on_request(|_request: &Request<_>, _span: &Span| {
            tracing::debug!("request started");
        })
        .on_response(|response: &Response, latency: std::time::Duration, span: &Span| {
            let status = response.status();
            span.record("status", tracing::field::display(status));
            span.record("latency_ms", latency.as_secs_f64() * 1000.0);

            let status_label = status.as_str().to_owned();

            increment_counter!("http_requests_total", "status" => status_label.clone());
            histogram!("http_request_duration_seconds", latency.as_secs_f64(), "status" => status_label);

            tracing::debug!("request completed");
        })
        .on_failure(|error: ServerErrorsFailureClass, latency: std::time::Duration, span: &Span| {
            let error_label = error.to_string();
            span.record("status", tracing::field::display(&error_label));
            span.record("latency_ms", latency.as_secs_f64() * 1000.0);

            tracing::warn!(status = %error_label, latency_ms = latency.as_secs_f64() * 1000.0, "request failed");
        });

    let service_stack = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            http::header::HeaderName::from_static("x-request-id"),
            MakeRequestUuid,
        ))
        .layer(trace_layer)
        .layer(PropagateRequestIdLayer::new(
            http::header::HeaderName::from_static("x-request-id"),
        ))
        .into_inner();

    Router::new()
        .route("/healthz", get(handlers::health))
        .route("/readyz", get(handlers::readiness))
        .route("/metrics", get(handlers::metrics))
        .merge(content_routes(state.clone()))
        .fallback(handlers::not_found)
        .layer(service_stack)
        .layer(axum::Extension(state))
}

/// Routes under the configured root, each behind [`attach_content`].
///
/// Meant to be merged into a hosting router, since the route root is matched
/// against the full request path.
pub fn content_routes(state: AppState) -> Router {
    let router = content_paths(state.loader().route_root())
        .into_iter()
        .fold(Router::new(), |router, path| {
            router.route(&path, get(handlers::content))
        });

    router.route_layer(middleware::from_fn_with_state(state, attach_content))
}

fn content_paths(route_root: &str) -> Vec<String> {
    if route_root.is_empty() {
        return vec!["/".to_owned(), "/*path".to_owned()];
    }

    vec![
        format!("/{route_root}"),
        format!("/{route_root}/"),
        format!("/{route_root}/*path"),
    ]
}
