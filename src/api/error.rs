//! HTTP error mapping
//!
//! Translates core errors into status codes with a `{"detail": ...}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use sentinel_core::Error;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Wrapper carrying a core error out of a handler.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            Error::NotFound { .. } => (StatusCode::NOT_FOUND, self.0.to_string()),
            Error::EmailTaken => (StatusCode::BAD_REQUEST, self.0.to_string()),
            Error::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            _ => {
                tracing::error!(error = %self.0, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorDetail { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: Error) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            status_of(Error::NotFound { entity: "User" }),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_email_taken_maps_to_400() {
        assert_eq!(status_of(Error::EmailTaken), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_credentials_maps_to_401() {
        assert_eq!(
            status_of(Error::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_storage_error_hides_detail() {
        let response = ApiError::from(Error::Storage("disk full".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
