use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Shared-secret check on the `x-api-key` header.
#[derive(Clone, Debug, Default)]
pub struct ApiKeyAuth {
    expected: Option<String>,
}

impl ApiKeyAuth {
    pub fn new(expected: Option<String>) -> Self {
        Self {
            expected: expected.filter(|key| !key.is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.expected.is_some()
    }

    pub fn check(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        let expected = self.expected.as_deref().ok_or(ApiError::ApiKeyNotConfigured)?;
        let provided = headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());
        match provided {
            Some(key) if key == expected => Ok(()),
            _ => Err(ApiError::Unauthorized),
        }
    }
}

/// Middleware rejecting requests that fail [`ApiKeyAuth::check`].
pub async fn require_api_key(
    State(auth): State<Arc<ApiKeyAuth>>,
    req: Request,
    next: Next,
) -> Response {
    match auth.check(req.headers()) {
        Ok(()) => next.run(req).await,
        Err(err) => {
            tracing::debug!(path = %req.uri().path(), error = err.code(), "request rejected");
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(key: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_str(key).unwrap());
        headers
    }

    #[test]
    fn matching_key_passes() {
        let auth = ApiKeyAuth::new(Some("secret".into()));
        assert!(auth.check(&headers("secret")).is_ok());
    }

    #[test]
    fn wrong_or_missing_key_is_unauthorized() {
        let auth = ApiKeyAuth::new(Some("secret".into()));
        assert_eq!(auth.check(&headers("nope")).unwrap_err().code(), "unauthorized");
        assert_eq!(auth.check(&HeaderMap::new()).unwrap_err().code(), "unauthorized");
    }

    #[test]
    fn unconfigured_key_is_server_error() {
        for auth in [ApiKeyAuth::new(None), ApiKeyAuth::new(Some(String::new()))] {
            assert!(!auth.is_configured());
            let err = auth.check(&headers("anything")).unwrap_err();
            assert_eq!(err.code(), "api_key_not_configured");
        }
    }
}
