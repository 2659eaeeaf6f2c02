use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use common::RequestContext;
use tracing::{debug, warn};

use crate::{app::AppState, context::original_uri, errors::HttpError, telemetry};

/// Loads the menu and page for the request path and attaches them as
/// [`content::ContentData`] before running the next handler.
///
/// A failed load answers with the error response; the next handler does not run.
pub async fn attach_content(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let uri = original_uri(request.extensions(), request.uri());
    let context = RequestContext::from_http_parts(request.method(), &uri, request.headers());

    let started = Instant::now();
    let loaded = state
        .loader()
        .load(&context.original_path, context.query.as_deref())
        .await;

    match loaded {
        Ok(content) => {
            telemetry::record_content_load("ok", started.elapsed());
            debug!(
                request_id = %context.trace.request_id,
                path = %context.original_path,
                "content attached",
            );

            let extensions = request.extensions_mut();
            extensions.insert(content);
            extensions.insert(context);
            next.run(request).await
        }
        Err(err) => {
            telemetry::record_content_load(err.kind(), started.elapsed());
            warn!(
                request_id = %context.trace.request_id,
                path = %context.original_path,
                error = %err,
                "content could not be loaded",
            );

            HttpError::from(err).into_response()
        }
    }
}
