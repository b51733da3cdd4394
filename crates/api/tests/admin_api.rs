mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::*;
use internhub_db::memory::MemoryBackend;
use internhub_genai::{Attempt, DescriptionGenerator, GeminiApiError, GenerationTransport, ModelInfo};
use serde_json::json;
use tokio::sync::Notify;

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn project_create_edit_delete() {
    let test = build_test_app().await;
    let token = admin_token(&test.app).await;

    let data = page_data(post(&test.app, "/admin/projects/modal/new", Some(&token)).await).await;
    assert_eq!(data["modal"]["mode"], "create");

    let data = page_data(
        post_json(
            &test.app,
            "/admin/projects/save",
            Some(&token),
            json!({ "title": "Onboarding", "description": "First week" }),
        )
        .await,
    )
    .await;
    assert_eq!(data["success"], "Project created successfully!");
    assert!(data["modal"].is_null());
    let id = data["projects"][0]["id"].as_str().unwrap().to_string();
    assert_eq!(data["projects"][0]["status"], "planned");

    let data = page_data(
        post(&test.app, &format!("/admin/projects/modal/edit/{id}"), Some(&token)).await,
    )
    .await;
    assert_eq!(data["modal"]["mode"], "edit");
    assert_eq!(data["modal"]["form"]["title"], "Onboarding");

    let data = page_data(
        post_json(
            &test.app,
            "/admin/projects/save",
            Some(&token),
            json!({ "title": "Onboarding v2", "status": "in-progress" }),
        )
        .await,
    )
    .await;
    assert_eq!(data["success"], "Project updated successfully!");
    assert_eq!(data["projects"][0]["title"], "Onboarding v2");
    assert_eq!(data["projects"][0]["status"], "in-progress");

    let data = page_data(
        post(&test.app, &format!("/admin/projects/delete/request/{id}"), Some(&token)).await,
    )
    .await;
    assert_eq!(data["confirm_delete"]["target_id"], id.as_str());

    let data = page_data(post(&test.app, "/admin/projects/delete/confirm", Some(&token)).await).await;
    assert_eq!(data["success"], "Project deleted successfully!");
    assert!(data["confirm_delete"].is_null());
    assert_eq!(data["projects"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn blank_project_title_keeps_modal_open() {
    let test = build_test_app().await;
    let token = admin_token(&test.app).await;
    post(&test.app, "/admin/projects/modal/new", Some(&token)).await;

    let data = page_data(
        post_json(
            &test.app,
            "/admin/projects/save",
            Some(&token),
            json!({ "title": "   ", "description": "kept" }),
        )
        .await,
    )
    .await;
    assert_eq!(data["error"], "Please enter a project title");
    assert_eq!(data["modal"]["form"]["description"], "kept");
    assert!(test.backend.rows("projects").await.is_empty());
}

#[tokio::test]
async fn cancelled_delete_keeps_project() {
    let test = build_test_app().await;
    let token = admin_token(&test.app).await;
    let id = create_project(&test.app, &token, "Keep me").await;

    post(&test.app, &format!("/admin/projects/delete/request/{id}"), Some(&token)).await;
    let data = page_data(post(&test.app, "/admin/projects/delete/cancel", Some(&token)).await).await;
    assert!(data["confirm_delete"].is_null());

    // Confirming with nothing pending is a no-op.
    let data = page_data(post(&test.app, "/admin/projects/delete/confirm", Some(&token)).await).await;
    assert_eq!(data["projects"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn editing_unknown_project_is_not_found() {
    let test = build_test_app().await;
    let token = admin_token(&test.app).await;
    let response = post(
        &test.app,
        "/admin/projects/modal/edit/7f7a3b7e-7d2c-4b8b-9a4e-0c1d2e3f4a5b",
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_project_removes_its_tasks() {
    let test = build_test_app().await;
    let token = admin_token(&test.app).await;
    let project_id = create_project(&test.app, &token, "Doomed").await;

    page_data(
        post_json(
            &test.app,
            "/admin/tasks/save",
            Some(&token),
            json!({
                "title": "Orphan-to-be",
                "project_id": project_id.to_string(),
                "assignee_id": test.intern_id.to_string(),
            }),
        )
        .await,
    )
    .await;
    assert_eq!(test.backend.rows("tasks").await.len(), 1);

    post(&test.app, &format!("/admin/projects/delete/request/{project_id}"), Some(&token)).await;
    page_data(post(&test.app, "/admin/projects/delete/confirm", Some(&token)).await).await;
    assert!(test.backend.rows("tasks").await.is_empty());

    let data = page_data(get(&test.app, "/admin/tasks", Some(&token)).await).await;
    assert!(data["tasks"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn task_page_lists_project_and_intern_options() {
    let test = build_test_app().await;
    let token = admin_token(&test.app).await;
    create_project(&test.app, &token, "Onboarding").await;

    let data = page_data(get(&test.app, "/admin/tasks", Some(&token)).await).await;
    assert_eq!(data["projects"][0]["title"], "Onboarding");
    let interns = data["interns"].as_array().unwrap();
    assert_eq!(interns.len(), 1);
    assert_eq!(interns[0]["full_name"], "Ivan Intern");
}

#[tokio::test]
async fn task_without_assignee_or_project_is_rejected() {
    let test = build_test_app().await;
    let token = admin_token(&test.app).await;
    let project_id = create_project(&test.app, &token, "Onboarding").await;
    post(&test.app, "/admin/tasks/modal/new", Some(&token)).await;

    let data = page_data(
        post_json(
            &test.app,
            "/admin/tasks/save",
            Some(&token),
            json!({ "title": "Write README", "project_id": project_id.to_string(), "assignee_id": "" }),
        )
        .await,
    )
    .await;
    assert_eq!(data["error"], "Please fill in all required fields");
    assert_eq!(data["modal"]["form"]["title"], "Write README");

    let data = page_data(
        post_json(
            &test.app,
            "/admin/tasks/save",
            Some(&token),
            json!({ "title": "Write README", "assignee_id": test.intern_id.to_string() }),
        )
        .await,
    )
    .await;
    assert_eq!(data["error"], "Please fill in all required fields");
    assert!(test.backend.rows("tasks").await.is_empty());
}

#[tokio::test]
async fn task_create_and_edit_with_embeds() {
    let test = build_test_app().await;
    let token = admin_token(&test.app).await;
    let project_id = create_project(&test.app, &token, "Onboarding").await;

    post(&test.app, "/admin/tasks/modal/new", Some(&token)).await;
    let data = page_data(
        post_json(
            &test.app,
            "/admin/tasks/save",
            Some(&token),
            json!({
                "title": "Write README",
                "project_id": project_id.to_string(),
                "assignee_id": test.intern_id.to_string(),
                "due_date": "2026-11-01",
            }),
        )
        .await,
    )
    .await;
    assert_eq!(data["success"], "Task created successfully!");
    let task = &data["tasks"][0];
    assert_eq!(task["status"], "todo");
    assert_eq!(task["due_date"], "2026-11-01");
    assert_eq!(task["project"]["title"], "Onboarding");
    assert_eq!(task["assignee"]["full_name"], "Ivan Intern");
    let task_id = task["id"].as_str().unwrap().to_string();

    post(&test.app, &format!("/admin/tasks/modal/edit/{task_id}"), Some(&token)).await;
    let data = page_data(
        post_json(
            &test.app,
            "/admin/tasks/save",
            Some(&token),
            json!({
                "title": "Write README",
                "project_id": project_id.to_string(),
                "assignee_id": test.intern_id.to_string(),
                "status": "in-progress",
                "due_date": "",
            }),
        )
        .await,
    )
    .await;
    assert_eq!(data["success"], "Task updated successfully!");
    assert_eq!(data["tasks"][0]["status"], "in-progress");
    assert!(data["tasks"][0]["due_date"].is_null());
}

#[tokio::test]
async fn generation_without_credential_reports_not_configured() {
    let test = build_test_app().await;
    let token = admin_token(&test.app).await;

    let data = page_data(
        post_json(&test.app, "/admin/tasks/generate", Some(&token), json!({ "title": "Write README" })).await,
    )
    .await;
    assert!(data["error"].as_str().unwrap().contains("not configured"));
    assert!(data["modal"]["form"]["description"].is_null());
}

#[tokio::test]
async fn generation_requires_a_title() {
    let test = build_test_app().await;
    let token = admin_token(&test.app).await;

    let data = page_data(
        post_json(&test.app, "/admin/tasks/generate", Some(&token), json!({ "title": "  " })).await,
    )
    .await;
    assert!(data["error"].is_string());
    assert!(data["success"].is_null());
}

// ---------------------------------------------------------------------------
// Generation in flight
// ---------------------------------------------------------------------------

/// Answers every attempt, but only after `release` is notified.
struct GatedTransport {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl GenerationTransport for GatedTransport {
    async fn available_models(&self) -> Result<Vec<ModelInfo>, GeminiApiError> {
        Ok(Vec::new())
    }

    async fn generate(&self, _attempt: &Attempt, _prompt: &str) -> Result<String, GeminiApiError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok("Set up the repository and document the build steps.".to_string())
    }
}

#[tokio::test]
async fn save_during_generation_is_refused() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let generator = DescriptionGenerator::with_transport(Arc::new(GatedTransport {
        entered: entered.clone(),
        release: release.clone(),
    }));
    let test = build_test_app_with(MemoryBackend::new(), generator).await;
    let token = admin_token(&test.app).await;
    let project_id = create_project(&test.app, &token, "Onboarding").await;

    let app = test.app.clone();
    let generate_token = token.clone();
    let form = json!({
        "title": "Write README",
        "project_id": project_id.to_string(),
        "assignee_id": test.intern_id.to_string(),
    });
    let pending = {
        let form = form.clone();
        tokio::spawn(async move {
            post_json(&app, "/admin/tasks/generate", Some(&generate_token), form).await
        })
    };
    entered.notified().await;

    let response = post_json(&test.app, "/admin/tasks/save", Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["code"], "CONFLICT");
    assert!(test.backend.rows("tasks").await.is_empty());

    release.notify_one();
    let data = page_data(pending.await.unwrap()).await;
    assert_eq!(data["success"], "Description generated successfully!");
    assert_eq!(
        data["modal"]["form"]["description"],
        "Set up the repository and document the build steps."
    );
    assert_eq!(data["modal"]["form"]["title"], "Write README");
}

// ---------------------------------------------------------------------------
// Banner lifetime
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn success_banner_expires_after_three_seconds() {
    let test = build_test_app().await;
    let token = admin_token(&test.app).await;
    create_project(&test.app, &token, "Onboarding").await;

    tokio::time::advance(Duration::from_secs(2)).await;
    let data = page_data(get(&test.app, "/admin/projects", Some(&token)).await).await;
    assert_eq!(data["success"], "Project created successfully!");

    tokio::time::advance(Duration::from_secs(2)).await;
    let data = page_data(get(&test.app, "/admin/projects", Some(&token)).await).await;
    assert!(data["success"].is_null());
}

#[tokio::test(start_paused = true)]
async fn validation_error_stays_until_next_write() {
    let test = build_test_app().await;
    let token = admin_token(&test.app).await;
    post(&test.app, "/admin/projects/modal/new", Some(&token)).await;
    post_json(&test.app, "/admin/projects/save", Some(&token), json!({ "title": "" })).await;

    tokio::time::advance(Duration::from_secs(60)).await;
    let data = page_data(get(&test.app, "/admin/projects", Some(&token)).await).await;
    assert_eq!(data["error"], "Please enter a project title");

    let data = page_data(
        post_json(&test.app, "/admin/projects/save", Some(&token), json!({ "title": "Fixed" })).await,
    )
    .await;
    assert!(data["error"].is_null());
    assert_eq!(data["success"], "Project created successfully!");
}
