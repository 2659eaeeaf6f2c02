use common::{AppError, ErrorCode};
use thiserror::Error;

/// Failure modes of a content fetch.
///
/// A fetch either yields a fully parsed JSON value or exactly one of these.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API answered with a status other than 200 or 404.
    #[error("request failed with status code {status}")]
    RequestFailed { status: u16 },

    #[error("invalid content-type: expected application/json but got {found}")]
    InvalidContentType { found: String },

    #[error("response parsing error: {0}")]
    ResponseParsing(String),

    #[error("unsupported scheme '{0}': expected http or https")]
    UnsupportedScheme(String),

    #[error("invalid content API url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// Upstream HTTP status carried by status-driven failures.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::RequestFailed { status } => Some(*status),
            _ => None,
        }
    }

    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::RequestFailed { .. } => "request_failed",
            FetchError::InvalidContentType { .. } => "invalid_content_type",
            FetchError::ResponseParsing(_) => "response_parsing",
            FetchError::UnsupportedScheme(_) => "unsupported_scheme",
            FetchError::InvalidBaseUrl { .. } => "invalid_base_url",
            FetchError::Transport(_) => "transport",
        }
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        let code = match &err {
            FetchError::UnsupportedScheme(_) | FetchError::InvalidBaseUrl { .. } => {
                ErrorCode::Internal
            }
            _ => ErrorCode::UpstreamFailure,
        };
        let status = err.status_code();

        let mut app_error = AppError::new(code, format!("content API: {err}"));
        if let Some(status) = status {
            app_error = app_error.with_upstream_status(status);
        }
        app_error.with_source(err)
    }
}
