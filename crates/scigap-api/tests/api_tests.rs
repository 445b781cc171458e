//! API Integration Tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use scigap_api::create_router_for_testing;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Helper to create a test request
fn create_json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    match body {
        Some(json_body) => builder
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_readiness_check() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["ready"], true);
    assert_eq!(json["checks"]["extractor"], true);
}

// =============================================================================
// Document Processing Tests
// =============================================================================

#[tokio::test]
async fn test_process_text_extracts_sections_and_entities() {
    let app = create_router_for_testing();

    let text = "Overview paragraph here. Discussion blockchain adoption grew \
                alongside machine learning tools. Conclusion further blockchain \
                work is needed. References [1] ignored";

    let response = app
        .oneshot(create_json_request(
            "POST",
            "/api/v1/documents/text",
            Some(json!({ "text": text })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["message"], "Text processed successfully");

    let sections = &json["results"]["sections"];
    assert!(sections["discussion"]
        .as_str()
        .unwrap()
        .contains("blockchain adoption"));
    // References never leak into the conclusion body
    assert!(!sections["conclusion"].as_str().unwrap().contains("ignored"));

    let technologies = json["results"]["technologies"].as_object().unwrap();
    assert_eq!(technologies["blockchain"], 2);
}

#[tokio::test]
async fn test_process_text_rejects_empty_text() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(create_json_request(
            "POST",
            "/api/v1/documents/text",
            Some(json!({ "text": "   " })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_process_document_rejects_invalid_base64() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(create_json_request(
            "POST",
            "/api/v1/documents",
            Some(json!({ "filename": "a.pdf", "content": "not-base64!!!" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_process_document_rejects_empty_content() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(create_json_request(
            "POST",
            "/api/v1/documents",
            Some(json!({ "filename": "a.pdf", "content": "" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Validation Tests
// =============================================================================

#[tokio::test]
async fn test_validate_rejects_empty_sections() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(create_json_request(
            "POST",
            "/api/v1/validate",
            Some(json!({
                "sections": {},
                "authors": { "jane doe": 2 }
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_validate_rejects_missing_metadata() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(create_json_request(
            "POST",
            "/api/v1/validate",
            Some(json!({
                "sections": { "discussion": "some body" }
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_validate_happy_path() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(create_json_request(
            "POST",
            "/api/v1/validate",
            Some(json!({
                "sections": {
                    "discussion": "machine learning and blockchain with SVM methods"
                },
                "authors": { "jane doe": 2, "maria silva": 2 },
                "technologies": { "blockchain": 3 }
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["message"], "Validation completed successfully");

    // Two authors with equal counts: exactly one bit
    assert_eq!(json["entropy_values"]["authors_entropy"], 1.0);
    // One technology entry: zero uncertainty
    assert_eq!(json["entropy_values"]["technologies_entropy"], 0.0);
    // No research gap text supplied
    assert_eq!(json["entropy_values"]["research_gap_entropy"], 0.0);
    assert!(json["entropy_values"]["discussion"].is_number());

    assert_eq!(json["diversity_evaluation"]["authors"], "low");
    assert_eq!(json["diversity_evaluation"]["technologies"], "low");
    assert_eq!(json["diversity_evaluation"]["research_gaps"], "low");
    assert!(json["diversity_evaluation"]["sections"]["discussion"].is_string());
}

#[tokio::test]
async fn test_validate_scores_research_gap_text() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(create_json_request(
            "POST",
            "/api/v1/validate",
            Some(json!({
                "research_gaps": "Future work should combine machine learning, blockchain, \
                                  edge computing and digital twin approaches with NLP.",
                "sections": { "discussion": "short body" },
                "authors": { "jane doe": 2 }
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let gap_entropy = json["entropy_values"]["research_gap_entropy"].as_f64().unwrap();
    assert!(gap_entropy > 0.0);
    assert!(json["research_gaps"].as_str().unwrap().contains("Future work"));
}

// =============================================================================
// Analyze Tests
// =============================================================================

#[tokio::test]
async fn test_analyze_without_model_is_a_server_error() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(create_json_request(
            "POST",
            "/api/v1/analyze",
            Some(json!({
                "sections": { "discussion": "some findings" }
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = response_json(response).await;
    // The cause is logged, not exposed
    assert_eq!(json["message"], "Internal server error");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(create_json_request("POST", "/api/v1/nope", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
