//! Route definitions for the intern screens.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{dashboard, intern};
use crate::state::AppState;

/// Routes mounted at `/intern`. Every route requires an intern session.
///
/// ```text
/// GET    /                          -> dashboard::intern
/// GET    /tasks                     -> intern::my_tasks
/// POST   /tasks/{id}/complete       -> intern::complete_task
/// GET    /projects                  -> intern::my_projects
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::intern))
        .route("/tasks", get(intern::my_tasks))
        .route("/tasks/{id}/complete", post(intern::complete_task))
        .route("/projects", get(intern::my_projects))
}
