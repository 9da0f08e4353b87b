//! Gemini client tests against a local mock server.

use mockito::Matcher;
use serde_json::json;

use storypoint::{GeminiModel, GeminiProvider, LlmConfig, LlmProvider, StorypointError};

fn provider(server: &mockito::Server, model: GeminiModel) -> GeminiProvider {
    GeminiProvider::with_config("test-key", LlmConfig::with_model(model))
        .expect("provider")
        .with_base_url(server.url())
}

#[test]
fn test_generate_returns_text() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/models/gemini-1.5-flash:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{"role": "user", "parts": [{"text": "estimate this"}]}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{
                    "content": {"parts": [{"text": "Estimated Story Points: 8"}], "role": "model"}
                }]
            })
            .to_string(),
        )
        .create();

    let answer = provider(&server, GeminiModel::Gemini15Flash)
        .generate("estimate this")
        .unwrap();

    assert_eq!(answer, "Estimated Story Points: 8");
    mock.assert();
}

#[test]
fn test_selected_model_in_path() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/models/gemini-1.5-pro:generateContent")
        .with_status(200)
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"ok"}]}}]}"#)
        .create();

    provider(&server, GeminiModel::Gemini15Pro)
        .generate("x")
        .unwrap();
    mock.assert();
}

#[test]
fn test_auth_failure_surfaces_api_error() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", Matcher::Any)
        .with_status(400)
        .with_body(
            r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#,
        )
        .expect(1)
        .create();

    let err = provider(&server, GeminiModel::default())
        .generate("x")
        .unwrap_err();

    match err {
        StorypointError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "API key not valid.");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[test]
fn test_server_error_is_not_retried() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", Matcher::Any)
        .with_status(503)
        .with_body("unavailable")
        .expect(1)
        .create();

    let result = provider(&server, GeminiModel::default()).generate("x");
    assert!(matches!(result, Err(StorypointError::Api { status: 503, .. })));
    mock.assert();
}

#[test]
fn test_empty_candidates_is_error() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", Matcher::Any)
        .with_status(200)
        .with_body(r#"{"candidates":[]}"#)
        .create();

    let result = provider(&server, GeminiModel::default()).generate("x");
    assert!(matches!(result, Err(StorypointError::Api { .. })));
}

#[test]
fn test_unreachable_host_is_transport_error() {
    let provider = GeminiProvider::new("k")
        .unwrap()
        .with_base_url("http://127.0.0.1:9");
    assert!(matches!(
        provider.generate("x"),
        Err(StorypointError::Transport(_))
    ));
}
