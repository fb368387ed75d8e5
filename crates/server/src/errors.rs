use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use backend::BackendError;
use serde::Serialize;
use service::errors::{FormError, ServiceError};
use tracing::error;

/// Error body of the admin API. Store errors keep their `code`, `details` and `hint`.
#[derive(Debug, Serialize)]
pub struct JsonApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    pub message: Option<String>,
    pub code: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: Option<String>) -> Self {
        Self { status, error: error.into(), message, code: None, details: None, hint: None }
    }
}

impl From<BackendError> for JsonApiError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::Api(pg) => {
                let status = StatusCode::from_u16(pg.status).unwrap_or(StatusCode::BAD_GATEWAY);
                Self {
                    status,
                    error: status.canonical_reason().unwrap_or("Backend Error").to_string(),
                    message: Some(pg.message),
                    code: pg.code,
                    details: pg.details,
                    hint: pg.hint,
                }
            }
            BackendError::EmptyResult { .. } => {
                Self::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string()))
            }
            BackendError::Network(_) | BackendError::Parse(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "Bad Gateway", Some(e.to_string()))
            }
        }
    }
}

impl From<FormError> for JsonApiError {
    fn from(e: FormError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string()))
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Backend(b) => b.into(),
            ServiceError::Form(f) => f.into(),
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), error = %self.error, message = ?self.message, "request failed");
        }
        (self.status, Json(self)).into_response()
    }
}
