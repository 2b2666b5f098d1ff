//! Error types for the CAS API service.
//!
//! Only login and routing failures surface as HTTP errors. Validation
//! failures are reported in-band with a `200` by the protocol formatters.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mockcas_core::AuthError;
use serde::Serialize;

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Login requires a valid service or TARGET parameter")]
    MissingTarget,

    #[error("Forbidden: {0}")]
    Auth(#[from] AuthError),

    #[error("Not found")]
    NotFound,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingTarget => StatusCode::BAD_REQUEST,
            Self::Auth(_) => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingTarget => "BAD_REQUEST",
            Self::Auth(_) => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
