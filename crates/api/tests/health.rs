mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, location};

#[tokio::test]
async fn health_reports_backend_and_generation() {
    let test = build_test_app().await;
    let response = get(&test.app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["backend_healthy"], true);
    assert_eq!(json["generation_configured"], false);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let test = build_test_app().await;
    let response = get(&test.app, "/health", None).await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn unknown_paths_redirect_to_role_selection() {
    let test = build_test_app().await;
    for path in ["/nope", "/admin/unknown", "/intern/tasks/extra/deep"] {
        let response = get(&test.app, path, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response), Some("/"), "{path}");
    }
}

#[tokio::test]
async fn landing_lists_both_roles() {
    let test = build_test_app().await;
    let json = body_json(get(&test.app, "/", None).await).await;
    let roles = json["data"]["roles"].as_array().unwrap();
    assert_eq!(roles.len(), 2);
    assert_eq!(roles[0]["role"], "admin");
    assert_eq!(roles[0]["login"], "/login?role=admin");
    assert_eq!(roles[1]["signup"], "/signup?role=intern");
}
