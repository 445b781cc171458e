//! Scigap API Server
//!
//! REST API server for the scientific-article analysis pipeline.

use scigap_api::{create_router, state::AppState};
use scigap_core::AppConfig;
use scigap_remote::create_gap_client;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scigap_api=debug,tower_http=debug".into()),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env().unwrap_or_default();
    let addr = format!("{}:{}", config.server.host, config.server.port);

    // The NER model loads once here and is shared across requests
    let mut state = AppState::new(config);
    match create_gap_client(&state.config.llm) {
        Ok(gap_model) => {
            state = state.with_gap_model(gap_model);
        }
        Err(e) => {
            tracing::warn!("research gap generation disabled: {e}");
        }
    }
    let state = Arc::new(state);

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Scigap API Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);
    tracing::info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
