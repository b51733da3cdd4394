//! Model/version fallback sweep.
//!
//! The candidate list and the attempt order are computed up front; the
//! sweep then walks the attempts one at a time and stops at the first
//! usable response.

use async_trait::async_trait;
use internhub_core::derived::dedup_by_key;

use crate::api::{GeminiApi, GeminiApiError, ModelInfo};

/// API versions tried for every model, in order.
pub const API_VERSIONS: [&str; 2] = ["v1", "v1beta"];

/// Models tried after whatever the listing reported.
pub const FALLBACK_MODELS: [&str; 5] = [
    "gemini-1.5-flash",
    "gemini-1.5-pro",
    "gemini-pro",
    "gemini-2.0-flash-exp",
    "gemini-2.5-flash-lite",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub model: String,
    pub version: &'static str,
}

/// Where generation requests go. Implemented by [`GeminiApi`]; tests
/// substitute scripted transports.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    async fn available_models(&self) -> Result<Vec<ModelInfo>, GeminiApiError>;

    async fn generate(&self, attempt: &Attempt, prompt: &str) -> Result<String, GeminiApiError>;
}

#[async_trait]
impl GenerationTransport for GeminiApi {
    async fn available_models(&self) -> Result<Vec<ModelInfo>, GeminiApiError> {
        self.list_models(API_VERSIONS[0]).await
    }

    async fn generate(&self, attempt: &Attempt, prompt: &str) -> Result<String, GeminiApiError> {
        self.generate_content(attempt.version, &attempt.model, prompt)
            .await
    }
}

/// Listed models that support `generateContent`, then the fixed fallbacks,
/// without duplicates.
pub fn candidate_models(listed: &[ModelInfo]) -> Vec<String> {
    let supported = listed
        .iter()
        .filter(|m| m.supports_generate_content())
        .map(|m| m.short_name().to_string());
    let fallbacks = FALLBACK_MODELS.iter().map(|m| m.to_string());
    dedup_by_key(supported.chain(fallbacks), |m| m.clone())
}

/// Every model paired with every API version, model-major.
pub fn plan_attempts(models: &[String]) -> Vec<Attempt> {
    models
        .iter()
        .flat_map(|model| {
            API_VERSIONS.iter().map(move |version| Attempt {
                model: model.clone(),
                version: *version,
            })
        })
        .collect()
}

/// All attempts failed.
#[derive(Debug)]
pub struct SweepFailure {
    pub attempts: usize,
    pub last_error: Option<GeminiApiError>,
}

/// Try each attempt in order, returning the first reply that is not blank,
/// trimmed. A blank reply counts as a failed attempt.
pub async fn sweep(
    transport: &dyn GenerationTransport,
    attempts: &[Attempt],
    prompt: &str,
) -> Result<(Attempt, String), SweepFailure> {
    let mut last_error = None;

    for attempt in attempts {
        match transport.generate(attempt, prompt).await {
            Ok(text) if !text.trim().is_empty() => {
                tracing::info!(model = %attempt.model, version = attempt.version, "Generation succeeded");
                return Ok((attempt.clone(), text.trim().to_string()));
            }
            Ok(_) => {
                tracing::debug!(model = %attempt.model, version = attempt.version, "Blank generation reply");
                last_error = Some(GeminiApiError::InvalidResponse);
            }
            Err(e) => {
                tracing::debug!(
                    model = %attempt.model,
                    version = attempt.version,
                    error = %e,
                    "Generation attempt failed"
                );
                last_error = Some(e);
            }
        }
    }

    Err(SweepFailure {
        attempts: attempts.len(),
        last_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, methods: &[&str]) -> ModelInfo {
        ModelInfo {
            name: name.into(),
            supported_generation_methods: methods.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn listed_models_come_first_and_duplicates_drop() {
        let listed = vec![
            model("models/gemini-2.5-flash", &["generateContent"]),
            model("models/gemini-1.5-flash", &["GENERATE_CONTENT"]),
            model("models/text-embedding-004", &["embedContent"]),
        ];
        assert_eq!(
            candidate_models(&listed),
            vec![
                "gemini-2.5-flash",
                "gemini-1.5-flash",
                "gemini-1.5-pro",
                "gemini-pro",
                "gemini-2.0-flash-exp",
                "gemini-2.5-flash-lite",
            ]
        );
    }

    #[test]
    fn empty_listing_uses_fallbacks_only() {
        assert_eq!(candidate_models(&[]), FALLBACK_MODELS.to_vec());
    }

    #[test]
    fn attempts_are_model_major() {
        let attempts = plan_attempts(&["a".to_string(), "b".to_string()]);
        let pairs: Vec<(&str, &str)> = attempts
            .iter()
            .map(|a| (a.model.as_str(), a.version))
            .collect();
        assert_eq!(
            pairs,
            vec![("a", "v1"), ("a", "v1beta"), ("b", "v1"), ("b", "v1beta")]
        );
    }
}
