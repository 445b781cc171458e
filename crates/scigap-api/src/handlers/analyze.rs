//! Research-gap analysis handler

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

/// Analyze request: the sections extracted from a document
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Canonical section name → section body
    #[schema(value_type = Object)]
    pub sections: BTreeMap<String, String>,
}

/// Analyze response
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    pub message: String,
    /// Model-written research gap prose
    pub research_gaps: String,
}

/// Identify research gaps in the extracted sections
#[utoipa::path(
    post,
    path = "/api/v1/analyze",
    tag = "analysis",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Research gaps identified", body = AnalyzeResponse),
        (status = 400, description = "No relevant sections", body = crate::error::ApiError),
        (status = 500, description = "Model failure", body = crate::error::ApiError)
    )
)]
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let gap_model = state
        .gap_model
        .as_ref()
        .ok_or_else(|| AppError::Internal("research gap model not configured".to_string()))?;

    let research_gaps = gap_model.identify_gaps(&req.sections).await?;

    Ok((
        StatusCode::OK,
        Json(AnalyzeResponse {
            message: "Research gaps identified successfully".to_string(),
            research_gaps,
        }),
    ))
}
