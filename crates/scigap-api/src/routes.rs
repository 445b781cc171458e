//! API route definitions

use crate::handlers::{analyze, documents, validate};
use crate::state::AppState;
use axum::{routing::post, Router};
use std::sync::Arc;

/// Create API v1 routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Document processing
        .route("/documents", post(documents::process_document))
        .route("/documents/text", post(documents::process_text))
        // Research gap generation
        .route("/analyze", post(analyze::analyze))
        // Entropy validation
        .route("/validate", post(validate::validate))
}
