//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crm_core::CrmError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream authentication failed: {0}")]
    UpstreamAuth(String),

    #[error("Upstream unreachable: {0}")]
    UpstreamTransport(String),

    #[error("Upstream fault: {0}")]
    UpstreamFault(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone())
            }
            ApiError::UpstreamAuth(msg) => {
                (StatusCode::BAD_GATEWAY, "upstream_auth_failed", msg.clone())
            }
            ApiError::UpstreamTransport(msg) => {
                (StatusCode::BAD_GATEWAY, "upstream_unreachable", msg.clone())
            }
            ApiError::UpstreamFault(msg) => {
                (StatusCode::BAD_GATEWAY, "upstream_fault", msg.clone())
            }
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<CrmError> for ApiError {
    fn from(err: CrmError) -> Self {
        match err {
            CrmError::InvalidInput { message } => ApiError::Validation(message),
            CrmError::Authentication { message } => ApiError::UpstreamAuth(message),
            CrmError::Transport { message, .. } => ApiError::UpstreamTransport(message),
            CrmError::Remote(fault) => ApiError::UpstreamFault(fault.to_string()),
            CrmError::Configuration { message } => ApiError::Internal(message),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}
