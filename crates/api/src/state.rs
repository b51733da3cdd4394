use std::sync::Arc;
use std::time::Duration;

use internhub_db::Store;
use internhub_genai::DescriptionGenerator;

use crate::config::ServerConfig;
use crate::views::ViewRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Backend handle (auth provider plus table store).
    pub store: Store,
    /// Task description drafting.
    pub generator: DescriptionGenerator,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Screen controllers of every signed-in session.
    pub views: Arc<ViewRegistry>,
}

impl AppState {
    pub fn new(store: Store, generator: DescriptionGenerator, config: ServerConfig) -> Self {
        let views = ViewRegistry::with_idle_ttl(Duration::from_secs(config.session_idle_secs));
        Self {
            store,
            generator,
            config: Arc::new(config),
            views: Arc::new(views),
        }
    }
}
