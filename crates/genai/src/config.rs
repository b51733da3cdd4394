use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Settings for the generation API client.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// `None` disables generation entirely.
    pub api_key: Option<String>,
    /// Base URL without a version segment.
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl GenerationConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                                      |
    /// |-----------------------|----------------------------------------------|
    /// | `GEMINI_API_KEY`      | unset (generation disabled)                  |
    /// | `GEMINI_ENDPOINT`     | `https://generativelanguage.googleapis.com`  |
    /// | `GEMINI_TIMEOUT_SECS` | `30`                                         |
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let endpoint = std::env::var("GEMINI_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.into())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs: u64 = std::env::var("GEMINI_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("GEMINI_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
