pub mod auth;
pub mod dashboard;
pub mod intern;
pub mod interns;
pub mod projects;
pub mod tasks;

use axum::response::Redirect;
use internhub_core::navigation::LANDING;

/// Unknown paths go back to role selection.
pub async fn fallback() -> Redirect {
    Redirect::to(LANDING)
}
