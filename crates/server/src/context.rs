use axum::extract::OriginalUri;
use axum::http::{request::Parts, Extensions, Uri};
use axum::response::Response;
use axum::{async_trait, extract::FromRequestParts};
use common::RequestContext;

/// Axum extractor that materialises a [`RequestContext`] for downstream handlers.
///
/// Reuses the context stored by the content middleware when present.
pub struct RequestContextExtractor(pub RequestContext);

#[async_trait]
impl<S> FromRequestParts<S> for RequestContextExtractor
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(context) = parts.extensions.get::<RequestContext>() {
            return Ok(Self(context.clone()));
        }

        let uri = original_uri(&parts.extensions, &parts.uri);
        let context = RequestContext::from_http_parts(&parts.method, &uri, &parts.headers);
        Ok(Self(context))
    }
}

/// URI as received by the outermost router, before any nesting stripped its prefix.
pub(crate) fn original_uri(extensions: &Extensions, uri: &Uri) -> Uri {
    extensions
        .get::<OriginalUri>()
        .map(|OriginalUri(original)| original.clone())
        .unwrap_or_else(|| uri.clone())
}
