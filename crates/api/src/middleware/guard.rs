//! Role-guarded page extractors.
//!
//! Each extractor resolves the request's session and settles a
//! [`RouteGuard`] for its role. Anything other than a signed-in principal
//! of that role is answered with a redirect to the login page; no
//! protected content and no error message are rendered. A token the auth
//! provider rejects also loses its per-session screen state.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use internhub_core::guard::{GuardState, RouteGuard};
use internhub_core::navigation::LOGIN;
use internhub_core::roles::Role;
use internhub_core::session::SessionContext;
use internhub_db::session::{resolve_session, SessionError};

use super::session::session_token;
use crate::state::AppState;

/// Redirect issued when the guard refuses a request.
#[derive(Debug)]
pub struct GuardRedirect(pub &'static str);

impl IntoResponse for GuardRedirect {
    fn into_response(self) -> Response {
        Redirect::to(self.0).into_response()
    }
}

async fn settle(parts: &Parts, state: &AppState, required: Role) -> Result<SessionContext, GuardRedirect> {
    let token = session_token(&parts.headers);
    let identity = resolve_session(&state.store, token.as_deref()).await;
    if let Err(e) = &identity {
        tracing::debug!(path = %parts.uri.path(), required = %required, reason = %e, "Route guard redirect");
    }
    // The auth provider no longer knows this token: its screen state is dead.
    if let (Some(token), Err(SessionError::NotSignedIn)) = (token.as_deref(), &identity) {
        if state.views.end_session(token).await {
            tracing::info!("Discarded view state of a revoked session");
        }
    }

    let mut guard = RouteGuard::new(required);
    match guard.resolve(identity) {
        GuardState::Allowed(session) => Ok(session.clone()),
        GuardState::Redirect(target) => Err(GuardRedirect(target)),
        GuardState::Pending => Err(GuardRedirect(LOGIN)),
    }
}

/// Requires a signed-in admin.
///
/// ```ignore
/// async fn admin_page(RequireAdmin(session): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub SessionContext);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = GuardRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        settle(parts, state, Role::Admin).await.map(RequireAdmin)
    }
}

/// Requires a signed-in intern.
pub struct RequireIntern(pub SessionContext);

impl FromRequestParts<AppState> for RequireIntern {
    type Rejection = GuardRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        settle(parts, state, Role::Intern).await.map(RequireIntern)
    }
}
