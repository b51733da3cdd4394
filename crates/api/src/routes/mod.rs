pub mod admin;
pub mod auth;
pub mod health;
pub mod intern;

use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the page and form-action route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                            role selection (public)
/// /login, /signup                              auth forms (public)
/// /logout                                      sign out
///
/// /admin                                       admin dashboard
/// /admin/projects                              project screen + actions
/// /admin/tasks                                 task screen + actions
/// /admin/interns                               intern screen + actions
///
/// /intern                                      intern dashboard
/// /intern/tasks                                my tasks + complete
/// /intern/projects                             my projects
///
/// anything else                                redirect to /
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/admin", admin::router())
        .nest("/intern", intern::router())
        .fallback(handlers::fallback)
}
