//! Route definitions for the public auth pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// GET          /                -> landing
/// GET  | POST  /login           -> login_page, login
/// GET  | POST  /signup          -> signup_page, signup
/// GET  | POST  /logout          -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::landing))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", get(auth::logout).post(auth::logout))
}
