//! Axum application setup.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use super::state::AppState;
use crate::web::static_handler;

/// Largest accepted upload.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/models", get(handlers::list_models))
        .route("/validate", post(handlers::validate_history))
        .route("/estimate", post(handlers::estimate_story));

    Router::new()
        .nest("/api", api_routes)
        .fallback(static_handler)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use storypoint::{EstimatorConfig, MockProvider};
    use tower::ServiceExt;

    const HISTORY: &str = "Summary,Description,AcceptanceCriteria,StoryPoints\n\
                           Login Page,Create login,User can login,5\n\
                           Broken,,AC,3\n";

    fn state_with(mock: Arc<MockProvider>) -> AppState {
        AppState::new(EstimatorConfig::default(), None).with_llm(mock)
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = create_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn estimate_request(body: Value) -> Request<Body> {
        Request::post("/api/estimate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_models_lists_default_first() {
        let request = Request::get("/api/models").body(Body::empty()).unwrap();
        let (status, body) = send(state_with(Arc::new(MockProvider::new())), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["default"], "gemini-1.5-flash");
        assert_eq!(body["models"][0], "gemini-1.5-flash");
        assert_eq!(body["models"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_validate_summarizes_upload() {
        let request = Request::post("/api/validate")
            .body(Body::from(HISTORY))
            .unwrap();
        let (status, body) = send(state_with(Arc::new(MockProvider::new())), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["rowCount"], 1);
        assert_eq!(body["summary"]["droppedRows"], 1);
        assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_validate_rejects_missing_columns() {
        let request = Request::post("/api/validate")
            .body(Body::from("Summary,Description\nA,B\n"))
            .unwrap();
        let (status, body) = send(state_with(Arc::new(MockProvider::new())), request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("Required columns"));
    }

    #[tokio::test]
    async fn test_validate_non_utf8_upload_is_unprocessable() {
        let mut upload = b"Summary,Description,AcceptanceCriteria,StoryPoints\n".to_vec();
        upload.extend_from_slice(b"\xff\xfe,B,C,5\n");
        let request = Request::post("/api/validate")
            .body(Body::from(upload))
            .unwrap();
        let (status, body) = send(state_with(Arc::new(MockProvider::new())), request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("CSV validation failed"));
    }

    #[tokio::test]
    async fn test_estimate_returns_model_answer() {
        let mock = Arc::new(MockProvider::with_response("Estimated Story Points: 8"));
        let request = estimate_request(json!({
            "apiKey": "k",
            "csv": HISTORY,
            "summary": "Logout Feature",
            "description": "Add logout button",
            "acceptanceCriteria": "User can logout"
        }));
        let (status, body) = send(state_with(mock.clone()), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["estimate"], "Estimated Story Points: 8");
        assert_eq!(body["examplesUsed"], 1);
        assert!(mock.prompts()[0].contains("Logout Feature"));
    }

    #[tokio::test]
    async fn test_estimate_checks_key_then_data_then_summary() {
        let mock = Arc::new(MockProvider::new());

        let (status, body) = send(state_with(mock.clone()), estimate_request(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Please provide a Gemini API Key.");

        let (_, body) = send(
            state_with(mock.clone()),
            estimate_request(json!({"apiKey": "k", "summary": "S"})),
        )
        .await;
        assert_eq!(body["message"], "Please load historical data.");

        let (_, body) = send(
            state_with(mock.clone()),
            estimate_request(json!({"apiKey": "k", "csv": HISTORY, "summary": "  "})),
        )
        .await;
        assert_eq!(body["message"], "Please provide a story summary.");

        assert!(mock.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_estimate_rejects_invalid_history_before_summary() {
        let mock = Arc::new(MockProvider::new());
        let request = estimate_request(json!({
            "apiKey": "k",
            "csv": "Summary,Description\nA,B\n",
            "summary": ""
        }));
        let (status, body) = send(state_with(mock.clone()), request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("Required columns"));
        assert!(mock.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_estimate_provider_failure_is_bad_gateway() {
        let request = estimate_request(json!({
            "apiKey": "k",
            "csv": HISTORY,
            "summary": "S"
        }));
        let (status, body) = send(
            state_with(Arc::new(MockProvider::failing("connection reset"))),
            request,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Error calling Gemini API"));
    }
}
