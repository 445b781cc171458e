//! Scigap API - REST server
//!
//! HTTP boundary for the article analysis pipeline: document
//! processing, research-gap generation, and entropy validation.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use axum::{
    http::HeaderValue,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::documents::process_document,
        handlers::documents::process_text,
        handlers::analyze::analyze,
        handlers::validate::validate,
    ),
    components(schemas(
        error::ApiError,
        handlers::documents::ProcessDocumentRequest,
        handlers::documents::ProcessDocumentResponse,
        handlers::documents::ProcessTextRequest,
        handlers::analyze::AnalyzeRequest,
        handlers::analyze::AnalyzeResponse,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "documents", description = "Document processing"),
        (name = "analysis", description = "Research gaps and diversity scoring")
    )
)]
pub struct ApiDoc;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = build_cors(&state.config.server.cors_origins, state.config.server.cors_enabled);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::health::metrics))
        .nest("/api/v1", routes::api_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Create a router with default state for integration tests
pub fn create_router_for_testing() -> Router {
    create_router(Arc::new(AppState::default()))
}

fn build_cors(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        return CorsLayer::new();
    }

    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    if parsed.is_empty() {
        // No configured origins: CORS stays closed
        CorsLayer::new()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
