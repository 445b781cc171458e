//! Entropy validation handler

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

use scigap_core::{EntropyReport, ValidationRequest};

/// Validate response
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub message: String,

    /// Entropy per metadata table, per section, and for the research
    /// gap text
    #[serde(flatten)]
    pub report: EntropyReport,

    /// Echo of the research gap text that was scored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_gaps: Option<String>,
}

/// Score diversity for entity tables, sections, and research-gap text
#[utoipa::path(
    post,
    path = "/api/v1/validate",
    tag = "analysis",
    request_body(content = Object, description = "Entity tables, sections, and optional research gap text"),
    responses(
        (status = 200, description = "Validation completed", body = Object),
        (status = 400, description = "Missing sections or metadata", body = crate::error::ApiError)
    )
)]
pub async fn validate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ValidationRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let report = state.analyzer.score(&req)?;

    Ok((
        StatusCode::OK,
        Json(ValidateResponse {
            message: "Validation completed successfully".to_string(),
            report,
            research_gaps: req.research_gaps,
        }),
    ))
}
