use std::time::Duration;

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`. `None` selects the
    /// in-memory backend.
    pub url: Option<String>,
    /// Public anon key sent as the `apikey` header on every request.
    pub anon_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl BackendConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default |
    /// |------------------------|---------|
    /// | `SUPABASE_URL`         | unset   |
    /// | `SUPABASE_ANON_KEY`    | empty   |
    /// | `BACKEND_TIMEOUT_SECS` | `15`    |
    pub fn from_env() -> Self {
        let url = std::env::var("SUPABASE_URL")
            .ok()
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty());

        let anon_key = std::env::var("SUPABASE_ANON_KEY").unwrap_or_default();

        let timeout_secs: u64 = std::env::var("BACKEND_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".into())
            .parse()
            .expect("BACKEND_TIMEOUT_SECS must be a valid u64");

        Self {
            url,
            anon_key,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
