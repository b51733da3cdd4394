//! Handlers for role selection, sign-in, sign-up and sign-out.

use axum::extract::{Query, State};
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use internhub_core::navigation::LANDING;
use internhub_core::roles::Role;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::session::{cleared_session_cookie, session_cookie, SessionToken};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::auth::{
    landing_page, LandingPage, LoginPage, LoginView, SignedIn, SignupPage, SignupView,
};

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// `?role=admin|intern` as set by the landing page cards.
#[derive(Debug, Default, Deserialize)]
pub struct RoleQuery {
    pub role: Option<String>,
}

impl RoleQuery {
    /// Unknown values are ignored.
    fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
pub async fn landing() -> Json<DataResponse<LandingPage>> {
    Json(DataResponse {
        data: landing_page(),
    })
}

/// GET /login
pub async fn login_page(Query(query): Query<RoleQuery>) -> Json<DataResponse<LoginPage>> {
    Json(DataResponse {
        data: LoginView::new(query.role()).page(),
    })
}

/// POST /login
///
/// On success answers `303 See Other` to the role's dashboard, sets the
/// session cookie and returns the access token in the body. Screen state
/// of a session the request was still carrying is discarded. On failure the
/// login page is returned with its error.
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
    SessionToken(previous): SessionToken,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    let mut view = LoginView::new(query.role());
    let Some(session) = view.submit(&state.store, &input.email, &input.password).await else {
        return Ok(Json(DataResponse { data: view.page() }).into_response());
    };

    if let Some(previous) = previous.filter(|t| *t != session.access_token) {
        if state.views.end_session(&previous).await {
            tracing::info!(user_id = %session.user_id, "Replaced session view state discarded");
        }
    }

    let signed_in = SignedIn::new(session);
    let cookie = session_cookie(&signed_in.access_token, state.config.secure_cookies)
        .ok_or_else(|| AppError::InternalError("Access token is not a valid cookie value".into()))?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert(LOCATION, HeaderValue::from_static(signed_in.redirect_to));

    Ok((
        StatusCode::SEE_OTHER,
        headers,
        Json(DataResponse { data: signed_in }),
    )
        .into_response())
}

/// GET /signup
pub async fn signup_page(Query(query): Query<RoleQuery>) -> Json<DataResponse<SignupPage>> {
    Json(DataResponse {
        data: SignupView::new(query.role()).page(),
    })
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
    Json(input): Json<SignupRequest>,
) -> Json<DataResponse<SignupPage>> {
    let mut view = SignupView::new(query.role());
    view.submit(
        &state.store,
        &input.email,
        &input.password,
        &input.confirm_password,
    )
    .await;
    Json(DataResponse { data: view.page() })
}

/// GET|POST /logout
///
/// Ends the session at the auth provider, drops the session's screen
/// state and clears the cookie. Always succeeds.
pub async fn logout(State(state): State<AppState>, SessionToken(token): SessionToken) -> Response {
    if let Some(token) = token {
        if let Err(e) = state.store.sign_out(&token).await {
            tracing::warn!(error = %e, "Sign-out at auth provider failed");
        }
        if state.views.end_session(&token).await {
            tracing::info!("Session view state discarded");
        }
    }
    ([(SET_COOKIE, cleared_session_cookie())], Redirect::to(LANDING)).into_response()
}
