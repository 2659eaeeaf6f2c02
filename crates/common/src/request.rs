use http::{HeaderMap, Method, Uri};
use serde::Serialize;
use uuid::Uuid;

/// Trace identifiers extracted from incoming requests to aid logging and telemetry correlation.
#[derive(Debug, Clone, Serialize)]
pub struct TraceContext {
    pub request_id: Uuid,
    pub trace_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_trace_id: Option<String>,
}

/// Request metadata captured before content is resolved for it.
#[derive(Debug, Clone, Serialize)]
pub struct RequestContext {
    pub trace: TraceContext,
    pub method: String,
    /// Path as the client sent it, including any mount prefix.
    pub original_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl RequestContext {
    /// Builds a new request context from HTTP primitives.
    pub fn from_http_parts(method: &Method, original_uri: &Uri, headers: &HeaderMap) -> Self {
        let request_id = extract_request_id(headers);
        let trace_id = extract_trace_id(headers).unwrap_or_else(Uuid::new_v4);
        let parent_trace_id = headers
            .get("traceparent")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_owned());

        Self {
            trace: TraceContext {
                request_id,
                trace_id,
                parent_trace_id,
            },
            method: method.to_string(),
            original_path: original_uri.path().to_owned(),
            query: original_uri.query().map(str::to_owned),
        }
    }
}

fn extract_request_id(headers: &HeaderMap) -> Uuid {
    headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
        .unwrap_or_else(Uuid::new_v4)
}

fn extract_trace_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get("x-trace-id")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
}
