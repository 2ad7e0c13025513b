//! Application-level error type returned by handlers.
//!
//! All variants serialise to the [`ErrorResponse`] JSON body and map to the
//! appropriate HTTP status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::engine::EngineError;
use crate::source::SourceError;

/// Error body: `{"error": "<message>", "code": "<code>"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// An error that a handler can return; converts directly to an HTTP response.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    BadGateway(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "invalid_parameter", msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "upstream_rejected", msg),
            AppError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "upstream_unavailable", msg)
            }
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
            }
        };
        let body = ErrorResponse::new(code, message);
        (status, Json(body)).into_response()
    }
}

impl From<SourceError> for AppError {
    fn from(e: SourceError) -> Self {
        match e {
            SourceError::Rejected { status: 401, .. } => {
                AppError::Unauthorized("the source rejected the access token".into())
            }
            SourceError::Rejected { .. } | SourceError::Malformed(_) => {
                tracing::warn!("source: {e}");
                AppError::BadGateway(e.to_string())
            }
            SourceError::Unavailable(_) => {
                tracing::warn!("source: {e}");
                AppError::ServiceUnavailable(e.to_string())
            }
        }
    }
}

impl From<EngineError> for AppError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::SchemaNotFound(_)
            | EngineError::ItemNotFound { .. }
            | EngineError::StreamNotFound { .. } => AppError::NotFound(e.to_string()),
            EngineError::ConfigMismatch { .. } => AppError::BadRequest(e.to_string()),
            EngineError::Source(source) => source.into(),
            EngineError::Graph(_) => {
                tracing::error!("graph: {e}");
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl From<plm_oslc::RenderError> for AppError {
    fn from(e: plm_oslc::RenderError) -> Self {
        tracing::error!("render: {e}");
        AppError::Internal(e.to_string())
    }
}
