//! Ollama connector tests against a wiremock endpoint.

use concierge::llm::{LlmConnector, LlmError, OllamaConnector};
use concierge::utils::config::{GenerationOptions, LlmConfig};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(base_url: &str, timeout_secs: u64) -> LlmConfig {
    LlmConfig {
        base_url: base_url.to_string(),
        model: "llama3.1:8b".to_string(),
        timeout_secs,
        options: GenerationOptions::default(),
    }
}

#[tokio::test]
async fn returns_the_completion_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "llama3.1:8b",
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.1:8b",
            "response": "Il ristorante apre alle 19:30.",
            "done": true
        })))
        .mount(&mock_server)
        .await;

    let connector = OllamaConnector::new(&config(&mock_server.uri(), 15));
    let reply = connector.send_prompt("a che ora apre il ristorante?").await;

    assert_eq!(reply.unwrap(), "Il ristorante apre alle 19:30.");
}

#[tokio::test]
async fn sends_the_fixed_generation_options() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "options": { "temperature": 0.3, "num_predict": 500 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "ok"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let connector = OllamaConnector::new(&config(&mock_server.uri(), 15));
    connector.send_prompt("prompt").await.unwrap();
}

#[tokio::test]
async fn slow_endpoint_yields_a_timeout_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "troppo tardi" }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let connector = OllamaConnector::new(&config(&mock_server.uri(), 1));
    let err = connector.send_prompt("prompt").await.unwrap_err();

    assert!(matches!(err, LlmError::Timeout(_)), "got: {err}");
}

#[tokio::test]
async fn unreachable_endpoint_yields_a_transport_error() {
    // Nothing listens on this port.
    let connector = OllamaConnector::new(&config("http://127.0.0.1:1", 1));
    let err = connector.send_prompt("prompt").await.unwrap_err();

    assert!(matches!(err, LlmError::Transport(_)), "got: {err}");
}

#[tokio::test]
async fn http_error_status_yields_a_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let connector = OllamaConnector::new(&config(&mock_server.uri(), 15));
    let err = connector.send_prompt("prompt").await.unwrap_err();

    assert!(matches!(err, LlmError::Transport(_)), "got: {err}");
}

#[tokio::test]
async fn malformed_body_yields_a_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let connector = OllamaConnector::new(&config(&mock_server.uri(), 15));
    let err = connector.send_prompt("prompt").await.unwrap_err();

    assert!(matches!(err, LlmError::Transport(_)), "got: {err}");
}
