//! API error handling
//!
//! Client mistakes come back as 400 with a concrete message. Upstream
//! extraction failures and internal pipeline failures come back as
//! server errors with a generic message; the specific cause is logged,
//! never exposed verbatim to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use scigap_core::ScigapError;
use scigap_text::TextError;

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn extraction_failed() -> Self {
        Self::new("EXTRACTION_FAILED", "Text extraction failed")
    }

    pub fn internal_error() -> Self {
        Self::new("INTERNAL_ERROR", "Internal server error")
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Extraction(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::bad_request(msg)),
            AppError::Extraction(msg) => {
                tracing::error!(cause = %msg, "upstream extraction failed");
                (StatusCode::BAD_GATEWAY, ApiError::extraction_failed())
            }
            AppError::Internal(msg) => {
                tracing::error!(cause = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, ApiError::internal_error())
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<ScigapError> for AppError {
    fn from(err: ScigapError) -> Self {
        match err {
            ScigapError::InvalidInput(msg) => AppError::BadRequest(msg),
            ScigapError::Extraction(msg) => AppError::Extraction(msg),
            ScigapError::Processing(msg) => AppError::Internal(format!("processing: {msg}")),
            ScigapError::Llm(msg) => AppError::Internal(format!("language model: {msg}")),
            ScigapError::Config(msg) => AppError::Internal(format!("configuration: {msg}")),
            ScigapError::Other(err) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<TextError> for AppError {
    fn from(err: TextError) -> Self {
        match err {
            TextError::EmptyDocument => {
                AppError::BadRequest("Document contains no extractable text".to_string())
            }
            other => AppError::Extraction(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
