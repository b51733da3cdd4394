use std::sync::Arc;

use internhub_core::error::CoreError;

use crate::api::{GeminiApi, GeminiApiError, ModelInfo};
use crate::config::GenerationConfig;
use crate::fallback::{candidate_models, plan_attempts, sweep, GenerationTransport};
use crate::prompt::build_prompt;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Gemini API key is not configured. Please set GEMINI_API_KEY in your environment.")]
    NotConfigured,

    #[error("Task title is required to generate description.")]
    TitleRequired,

    #[error(
        "All model attempts failed. Last error: {last_error}. Available models: {available_models}. \
         Please check your API key at https://makersuite.google.com/app/apikey and ensure it has access to Gemini models."
    )]
    Exhausted {
        last_error: String,
        available_models: String,
    },

    #[error("Failed to initialise generation client: {0}")]
    Client(#[source] GeminiApiError),
}

impl From<GenerationError> for CoreError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::TitleRequired => CoreError::Validation(err.to_string()),
            other => CoreError::GenerationFailed(other.to_string()),
        }
    }
}

/// Drafts task descriptions. Cheap to clone.
#[derive(Clone)]
pub struct DescriptionGenerator {
    transport: Option<Arc<dyn GenerationTransport>>,
}

impl DescriptionGenerator {
    /// Build from configuration. A missing API key yields a disabled
    /// generator that fails every call without touching the network.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let Some(api_key) = config.api_key.as_deref() else {
            return Ok(Self::disabled());
        };
        let api = GeminiApi::new(&config.endpoint, api_key, config.timeout)
            .map_err(GenerationError::Client)?;
        Ok(Self::with_transport(Arc::new(api)))
    }

    pub fn disabled() -> Self {
        Self { transport: None }
    }

    pub fn with_transport(transport: Arc<dyn GenerationTransport>) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    /// Generate a description for a task, trying every candidate model on
    /// every API version in turn.
    pub async fn generate_description(
        &self,
        task_title: &str,
        project_title: Option<&str>,
    ) -> Result<String, GenerationError> {
        let transport = self
            .transport
            .as_deref()
            .ok_or(GenerationError::NotConfigured)?;

        let task_title = task_title.trim();
        if task_title.is_empty() {
            return Err(GenerationError::TitleRequired);
        }
        let prompt = build_prompt(task_title, project_title);

        let listed: Vec<ModelInfo> = match transport.available_models().await {
            Ok(models) => models,
            Err(e) => {
                tracing::warn!(error = %e, "Could not list models, trying defaults");
                Vec::new()
            }
        };

        let attempts = plan_attempts(&candidate_models(&listed));
        match sweep(transport, &attempts, &prompt).await {
            Ok((_, text)) => Ok(text),
            Err(failure) => {
                tracing::warn!(attempts = failure.attempts, "All generation attempts failed");
                let available_models = if listed.is_empty() {
                    "none found".to_string()
                } else {
                    listed
                        .iter()
                        .map(|m| m.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                Err(GenerationError::Exhausted {
                    last_error: failure
                        .last_error
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| "Unknown error".to_string()),
                    available_models,
                })
            }
        }
    }
}
