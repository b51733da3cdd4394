//! REST client for the Gemini `models` and `generateContent` endpoints.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};

/// HTTP client for one Gemini-compatible endpoint and credential.
pub struct GeminiApi {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

/// One entry of the `models` listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelInfo {
    /// Full resource name, e.g. `models/gemini-1.5-flash`.
    pub name: String,
    #[serde(rename = "supportedGenerationMethods", default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    pub fn supports_generate_content(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == "generateContent" || m == "GENERATE_CONTENT")
    }

    /// Model id without the `models/` prefix.
    pub fn short_name(&self) -> &str {
        self.name.strip_prefix("models/").unwrap_or(&self.name)
    }
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

/// Errors from the generation API layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A 2xx response without `candidates[0].content.parts[0].text`.
    #[error("Invalid response format from Gemini API")]
    InvalidResponse,
}

impl GeminiApi {
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, GeminiApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint, api_key))
    }

    pub fn with_client(client: reqwest::Client, endpoint: &str, api_key: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// `GET {endpoint}/{version}/models`.
    pub async fn list_models(&self, version: &str) -> Result<Vec<ModelInfo>, GeminiApiError> {
        let response = self
            .client
            .get(format!("{}/{}/models", self.endpoint, version))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;
        let response =
            Self::ensure_success(response, |status| format!("Failed to list models: {status}"))
                .await?;
        let list: ModelList = response.json().await?;
        Ok(list.models)
    }

    /// `POST {endpoint}/{version}/models/{model}:generateContent` with a
    /// single text part. Returns the first candidate's text, trimmed.
    pub async fn generate_content(
        &self,
        version: &str,
        model: &str,
        prompt: &str,
    ) -> Result<String, GeminiApiError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(format!(
                "{}/{}/models/{}:generateContent",
                self.endpoint, version, model
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response, |status| {
            format!("API request failed with status {status} for model {model} ({version})")
        })
        .await?;
        let data: Value = response.json().await?;
        extract_text(&data).ok_or(GeminiApiError::InvalidResponse)
    }

    // ---- private helpers ----

    /// Map a non-2xx response to [`GeminiApiError::Api`], preferring the
    /// API's own `error.message`.
    async fn ensure_success(
        response: reqwest::Response,
        fallback: impl FnOnce(u16) -> String,
    ) -> Result<reqwest::Response, GeminiApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body: Value = response.json().await.unwrap_or(Value::Null);
        let message = body
            .pointer("/error/message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| fallback(status.as_u16()));
        Err(GeminiApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// `candidates[0].content.parts[0].text`, trimmed.
pub fn extract_text(data: &Value) -> Option<String> {
    data.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(|t| t.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_candidate_text() {
        let data = json!({
            "candidates": [{ "content": { "parts": [{ "text": "  Draft the README.\n" }] } }]
        });
        assert_eq!(extract_text(&data).as_deref(), Some("Draft the README."));
    }

    #[test]
    fn malformed_candidates_yield_none() {
        assert_eq!(extract_text(&json!({ "candidates": [] })), None);
        assert_eq!(extract_text(&json!({ "candidates": [{ "content": {} }] })), None);
        assert_eq!(extract_text(&json!({})), None);
    }

    #[test]
    fn model_capabilities() {
        let model = ModelInfo {
            name: "models/gemini-1.5-flash".into(),
            supported_generation_methods: vec!["countTokens".into(), "generateContent".into()],
        };
        assert!(model.supports_generate_content());
        assert_eq!(model.short_name(), "gemini-1.5-flash");

        let embed_only = ModelInfo {
            name: "models/embedding-001".into(),
            supported_generation_methods: vec!["embedContent".into()],
        };
        assert!(!embed_only.supports_generate_content());
    }
}
