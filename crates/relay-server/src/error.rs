use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use relay_backend::BackendError;
use relay_schema::ValidationErrors;
use relay_store::StoreError;
use serde_json::json;
use thiserror::Error;

/// Errors returned to HTTP clients as `{ok: false, error, ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request body is not valid JSON")]
    InvalidJson,

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("not found")]
    NotFound,

    #[error("event already exists")]
    EventExists,

    #[error("missing or wrong api key")]
    Unauthorized,

    #[error("no api key configured")]
    ApiKeyNotConfigured,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::Validation(_) => "validation_failed",
            Self::NotFound => "not_found",
            Self::EventExists => "event_exists",
            Self::Unauthorized => "unauthorized",
            Self::ApiKeyNotConfigured => "api_key_not_configured",
            Self::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::EventExists => StatusCode::CONFLICT,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::ApiKeyNotConfigured | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Store(StoreError::EventExists { .. }) => Self::EventExists,
            BackendError::Store(StoreError::NotFound { .. }) => Self::NotFound,
            BackendError::Store(StoreError::Unavailable(reason)) => Self::Internal(reason),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(errors) => json!({
                "ok": false,
                "error": self.code(),
                "errors": errors.errors(),
            }),
            Self::Internal(reason) => {
                tracing::error!(reason = %reason, "request failed");
                json!({ "ok": false, "error": self.code() })
            }
            _ => json!({ "ok": false, "error": self.code() }),
        };
        (status, Json(body)).into_response()
    }
}

/// Errors from running the server itself.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;
