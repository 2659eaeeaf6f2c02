use axum::response::{IntoResponse, Response};
use axum::Json;
use common::AppError;
use content::FetchError;

/// Wrapper type that enables converting `AppError` into HTTP responses.
#[derive(Debug)]
pub struct HttpError(pub AppError);

pub type HandlerResult<T> = Result<T, HttpError>;

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl From<FetchError> for HttpError {
    fn from(value: FetchError) -> Self {
        Self(AppError::from(value))
    }
}

/// Renders `{ code, message, upstream_status? }` with the status of the error code.
impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        (status, Json(self.0.as_payload())).into_response()
    }
}
