//! Document processing handlers
//!
//! Two entry points into the same pipeline: an uploaded PDF (decoded
//! and text-extracted locally) and pre-extracted text (the conversion
//! service path).

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use scigap_core::DocumentAnalysis;
use scigap_text::PdfExtractor;

/// Process document request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProcessDocumentRequest {
    /// Original file name
    #[schema(example = "article.pdf")]
    pub filename: String,

    /// Base64 encoded PDF content
    pub content: String,
}

/// Process document response
#[derive(Debug, Serialize, ToSchema)]
pub struct ProcessDocumentResponse {
    /// Request-scoped document id
    pub id: Uuid,

    pub message: String,

    /// Sections and cleaned entity frequency tables
    #[schema(value_type = Object)]
    pub results: DocumentAnalysis,

    pub processed_at: DateTime<Utc>,
}

/// Process an uploaded PDF document
#[utoipa::path(
    post,
    path = "/api/v1/documents",
    tag = "documents",
    request_body = ProcessDocumentRequest,
    responses(
        (status = 200, description = "Document processed", body = ProcessDocumentResponse),
        (status = 400, description = "Invalid request", body = crate::error::ApiError),
        (status = 502, description = "Text extraction failed", body = crate::error::ApiError)
    )
)]
pub async fn process_document(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProcessDocumentRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    if req.filename.trim().is_empty() {
        return Err(AppError::BadRequest("Filename cannot be empty".to_string()));
    }
    if req.content.is_empty() {
        return Err(AppError::BadRequest("Content cannot be empty".to_string()));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&req.content)
        .map_err(|_| AppError::BadRequest("Content is not valid base64".to_string()))?;

    let extracted = PdfExtractor::new().extract_bytes(&bytes)?;
    tracing::info!(
        filename = %req.filename,
        pages = ?extracted.page_count,
        "document text extracted"
    );

    let results = state.analyzer.analyze_text(&extracted.text)?;

    Ok((
        StatusCode::OK,
        Json(ProcessDocumentResponse {
            id: Uuid::new_v4(),
            message: "File processed successfully".to_string(),
            results,
            processed_at: Utc::now(),
        }),
    ))
}

/// Process pre-extracted text request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProcessTextRequest {
    /// Raw extracted document text
    pub text: String,
}

/// Run the pipeline over text extracted elsewhere
#[utoipa::path(
    post,
    path = "/api/v1/documents/text",
    tag = "documents",
    request_body = ProcessTextRequest,
    responses(
        (status = 200, description = "Text processed", body = ProcessDocumentResponse),
        (status = 400, description = "Invalid request", body = crate::error::ApiError)
    )
)]
pub async fn process_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProcessTextRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    if req.text.trim().is_empty() {
        return Err(AppError::BadRequest("Text cannot be empty".to_string()));
    }

    let results = state.analyzer.analyze_text(&req.text)?;

    Ok((
        StatusCode::OK,
        Json(ProcessDocumentResponse {
            id: Uuid::new_v4(),
            message: "Text processed successfully".to_string(),
            results,
            processed_at: Utc::now(),
        }),
    ))
}
