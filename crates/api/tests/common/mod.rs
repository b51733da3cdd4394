#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use internhub_core::roles::Role;
use internhub_core::types::EntityId;
use internhub_db::memory::MemoryBackend;
use internhub_db::Store;
use internhub_genai::DescriptionGenerator;
use serde_json::{json, Value};
use tower::ServiceExt;

use internhub_api::config::ServerConfig;
use internhub_api::router::build_app_router;
use internhub_api::state::AppState;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-pass";
pub const INTERN_EMAIL: &str = "intern@example.com";
pub const INTERN_PASSWORD: &str = "intern-pass";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        secure_cookies: false,
        session_idle_secs: 3600,
    }
}

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub backend: Arc<MemoryBackend>,
    pub admin_id: EntityId,
    pub intern_id: EntityId,
}

/// The full application over an in-memory backend seeded with one admin
/// and one intern, and a generator with no credential.
pub async fn build_test_app() -> TestApp {
    build_test_app_with(MemoryBackend::new(), DescriptionGenerator::disabled()).await
}

pub async fn build_test_app_with(backend: MemoryBackend, generator: DescriptionGenerator) -> TestApp {
    let backend = Arc::new(backend);
    let admin_id = backend
        .seed_user(ADMIN_EMAIL, ADMIN_PASSWORD, Role::Admin, Some("Ada Admin"))
        .await;
    let intern_id = backend
        .seed_user(INTERN_EMAIL, INTERN_PASSWORD, Role::Intern, Some("Ivan Intern"))
        .await;

    let config = test_config();
    let state = AppState::new(Store::new(backend.clone()), generator, config.clone());
    let app = build_app_router(state.clone(), &config);

    TestApp {
        app,
        state,
        backend,
        admin_id,
        intern_id,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

fn with_token(builder: axum::http::request::Builder, token: Option<&str>) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: &Router, path: &str, token: Option<&str>) -> Response {
    let request = with_token(Request::builder().method("GET").uri(path), token)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post(app: &Router, path: &str, token: Option<&str>) -> Response {
    let request = with_token(Request::builder().method("POST").uri(path), token)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, path: &str, token: Option<&str>, body: Value) -> Response {
    let request = with_token(Request::builder().method("POST").uri(path), token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// `data` of a 200 response.
pub async fn page_data(response: Response) -> Value {
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

pub fn location(response: &Response) -> Option<&str> {
    response.headers().get(LOCATION).and_then(|v| v.to_str().ok())
}

pub fn set_cookie(response: &Response) -> Option<&str> {
    response.headers().get(SET_COOKIE).and_then(|v| v.to_str().ok())
}

/// Sign in through `POST /login` and return the access token.
pub async fn sign_in(app: &Router, email: &str, password: &str) -> String {
    let response = post_json(
        app,
        "/login",
        None,
        json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER, "sign-in should redirect");
    let body = body_json(response).await;
    body["data"]["access_token"].as_str().unwrap().to_string()
}

pub async fn admin_token(app: &Router) -> String {
    sign_in(app, ADMIN_EMAIL, ADMIN_PASSWORD).await
}

pub async fn intern_token(app: &Router) -> String {
    sign_in(app, INTERN_EMAIL, INTERN_PASSWORD).await
}

/// Create a project through the admin project screen and return its id.
pub async fn create_project(app: &Router, token: &str, title: &str) -> EntityId {
    post(app, "/admin/projects/modal/new", Some(token)).await;
    let data = page_data(
        post_json(app, "/admin/projects/save", Some(token), json!({ "title": title })).await,
    )
    .await;
    let project = data["projects"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["title"] == title)
        .expect("project should be listed after save");
    project["id"].as_str().unwrap().parse().unwrap()
}
