//! The generation client against a local stub of the Gemini API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use internhub_genai::{DescriptionGenerator, GenerationConfig};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct Stub {
    generate_calls: Arc<AtomicUsize>,
}

#[derive(Deserialize)]
struct KeyQuery {
    key: String,
}

async fn list_models(Path(version): Path<String>, Query(q): Query<KeyQuery>) -> (StatusCode, Json<Value>) {
    if q.key != "test-key" || version != "v1" {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": { "message": "API key not valid" } })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "models": [
                { "name": "models/embedding-001", "supportedGenerationMethods": ["embedContent"] },
                { "name": "models/gemini-live", "supportedGenerationMethods": ["generateContent"] }
            ]
        })),
    )
}

/// Only `gemini-live` on `v1beta` answers.
async fn generate(
    State(stub): State<Stub>,
    Path((version, model_call)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    stub.generate_calls.fetch_add(1, Ordering::SeqCst);
    let prompt = body
        .pointer("/contents/0/parts/0/text")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if model_call != "gemini-live:generateContent" || version != "v1beta" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "message": format!("{model_call} is not found for API version {version}") } })),
        );
    }
    if !prompt.contains("Task Title: \"Write README\"") {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": { "message": "bad prompt" } })));
    }
    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "\nDocument setup steps in the README.\n" }] } }]
        })),
    )
}

async fn serve(stub: Stub) -> String {
    let app = Router::new()
        .route("/{version}/models", get(list_models))
        .route("/{version}/models/{model_call}", post(generate))
        .with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn config(endpoint: String, key: &str) -> GenerationConfig {
    GenerationConfig {
        api_key: Some(key.to_string()),
        endpoint,
        timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn listed_model_is_found_on_second_version() {
    let stub = Stub::default();
    let endpoint = serve(stub.clone()).await;
    let generator = DescriptionGenerator::from_config(&config(endpoint, "test-key")).unwrap();

    let text = generator
        .generate_description("Write README", Some("Onboarding"))
        .await
        .unwrap();

    assert_eq!(text, "Document setup steps in the README.");
    assert_eq!(stub.generate_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn invalid_key_exhausts_every_attempt() {
    let stub = Stub::default();
    let endpoint = serve(stub.clone()).await;
    let generator = DescriptionGenerator::from_config(&config(endpoint, "wrong-key")).unwrap();

    let err = generator
        .generate_description("Write README", None)
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("Available models: none found"), "{message}");
    assert!(message.contains("is not found for API version v1beta"), "{message}");
    assert_eq!(stub.generate_calls.load(Ordering::SeqCst), 10);
}
