//! Per-session controller storage.
//!
//! Controllers are keyed by the session's access token. Each one sits
//! behind its own [`Mutex`]: reads wait for it, writes take it with
//! `try_lock` so a second submission on a busy screen is refused instead
//! of queued. Sessions unseen for longer than the idle TTL are evicted
//! the next time any session touches the registry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard, RwLock};
use tokio::time::Instant;

use super::interns::InternsView;
use super::my_projects::MyProjectsView;
use super::my_tasks::MyTasksView;
use super::projects::ProjectsView;
use super::tasks::TasksView;
use crate::error::AppError;

/// Idle lifetime of a session's controllers.
pub const DEFAULT_SESSION_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Default)]
pub struct SessionViews {
    pub projects: Mutex<ProjectsView>,
    pub tasks: Mutex<TasksView>,
    pub interns: Mutex<InternsView>,
    pub my_tasks: Mutex<MyTasksView>,
    pub my_projects: Mutex<MyProjectsView>,
}

/// Claim a controller for a write, failing fast when another write on the
/// same screen is still running.
pub fn claim_for_write<T>(view: &Mutex<T>) -> Result<MutexGuard<'_, T>, AppError> {
    view.try_lock().map_err(|_| AppError::submission_in_progress())
}

#[derive(Debug)]
struct SessionEntry {
    views: Arc<SessionViews>,
    last_seen: Instant,
}

#[derive(Debug)]
pub struct ViewRegistry {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    idle_ttl: Duration,
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::with_idle_ttl(DEFAULT_SESSION_IDLE_TTL)
    }
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Controllers for a session, created empty on first use. Marks the
    /// session as seen and evicts every other session that has been idle
    /// past the TTL.
    pub async fn for_session(&self, access_token: &str) -> Arc<SessionViews> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|token, entry| {
            token == access_token || now.duration_since(entry.last_seen) < self.idle_ttl
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, "Evicted idle session view state");
        }

        let entry = sessions
            .entry(access_token.to_string())
            .or_insert_with(|| SessionEntry {
                views: Arc::default(),
                last_seen: now,
            });
        // A session idle past the TTL starts over with empty controllers.
        if now.duration_since(entry.last_seen) >= self.idle_ttl {
            entry.views = Arc::default();
        }
        entry.last_seen = now;
        Arc::clone(&entry.views)
    }

    /// Discard every controller of a session.
    pub async fn end_session(&self, access_token: &str) -> bool {
        self.sessions.write().await.remove(access_token).is_some()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use internhub_core::error::CoreError;

    use super::*;

    #[tokio::test]
    async fn same_token_gets_same_controllers() {
        let registry = ViewRegistry::new();
        let a = registry.for_session("tok-a").await;
        let again = registry.for_session("tok-a").await;
        let b = registry.for_session("tok-b").await;

        assert!(Arc::ptr_eq(&a, &again));
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(registry.session_count().await, 2);
    }

    #[tokio::test]
    async fn ending_a_session_drops_its_state() {
        let registry = ViewRegistry::new();
        let first = registry.for_session("tok").await;
        assert!(registry.end_session("tok").await);
        assert!(!registry.end_session("tok").await);

        let second = registry.for_session("tok").await;
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test(start_paused = true)]
    async fn idle_sessions_are_evicted_on_next_access() {
        let registry = ViewRegistry::with_idle_ttl(Duration::from_secs(60));
        registry.for_session("stale").await;
        registry.for_session("busy").await;

        tokio::time::advance(Duration::from_secs(45)).await;
        registry.for_session("busy").await;
        assert_eq!(registry.session_count().await, 2);

        tokio::time::advance(Duration::from_secs(30)).await;
        registry.for_session("busy").await;
        assert_eq!(registry.session_count().await, 1);
        assert!(!registry.end_session("stale").await);
    }

    #[tokio::test(start_paused = true)]
    async fn returning_after_ttl_gets_fresh_controllers() {
        let registry = ViewRegistry::with_idle_ttl(Duration::from_secs(60));
        let first = registry.for_session("tok").await;

        tokio::time::advance(Duration::from_secs(61)).await;
        let second = registry.for_session("tok").await;
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(registry.session_count().await, 1);
    }

    #[tokio::test]
    async fn second_writer_is_refused_while_first_holds_the_screen() {
        let views = SessionViews::default();
        let _first = claim_for_write(&views.projects).unwrap();

        let second = claim_for_write(&views.projects);
        assert_matches!(second, Err(AppError::Core(CoreError::Conflict(_))));
        assert!(claim_for_write(&views.tasks).is_ok());
    }
}
