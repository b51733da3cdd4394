//! An admin sets up work for an intern, the intern sees it, gets feedback
//! and completes it.

mod common;

use common::*;
use serde_json::json;

#[tokio::test]
async fn intern_onboarding_round_trip() {
    let test = build_test_app().await;
    let admin = admin_token(&test.app).await;
    let intern = intern_token(&test.app).await;

    let project_id = create_project(&test.app, &admin, "Onboarding").await;
    let data = page_data(
        post_json(
            &test.app,
            "/admin/tasks/save",
            Some(&admin),
            json!({
                "title": "Write README",
                "description": "Document the local setup.",
                "project_id": project_id.to_string(),
                "assignee_id": test.intern_id.to_string(),
            }),
        )
        .await,
    )
    .await;
    let task_id = data["tasks"][0]["id"].as_str().unwrap().to_string();

    // The intern sees the task with its project and nothing to report yet.
    let data = page_data(get(&test.app, "/intern/tasks", Some(&intern)).await).await;
    let tasks = data["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Write README");
    assert_eq!(tasks[0]["project"]["title"], "Onboarding");
    assert_eq!(tasks[0]["can_mark_complete"], true);
    assert!(tasks[0]["comments"].as_array().unwrap().is_empty());
    assert_eq!(data["summary"], "0 of 1 tasks completed");

    let data = page_data(get(&test.app, "/intern/projects", Some(&intern)).await).await;
    let projects = data["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["title"], "Onboarding");

    // The admin reviews the intern and leaves feedback.
    let data = page_data(
        post(&test.app, &format!("/admin/interns/select/{}", test.intern_id), Some(&admin)).await,
    )
    .await;
    assert_eq!(data["selected_intern"]["full_name"], "Ivan Intern");
    assert_eq!(data["tasks"][0]["id"], task_id.as_str());
    assert_eq!(data["intern_projects"][0]["title"], "Onboarding");

    let data = page_data(
        post(&test.app, &format!("/admin/interns/comments/modal/{task_id}"), Some(&admin)).await,
    )
    .await;
    assert_eq!(data["comment_modal"]["task_title"], "Write README");

    let data = page_data(
        post_json(
            &test.app,
            "/admin/interns/comments/save",
            Some(&admin),
            json!({ "body": "  Mention the env vars.  " }),
        )
        .await,
    )
    .await;
    assert!(data["comment_modal"].is_null());
    let comments = data["tasks"][0]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["body"], "Mention the env vars.");

    // The intern sees the comment attributed to the admin role.
    let data = page_data(get(&test.app, "/intern/tasks", Some(&intern)).await).await;
    let comment = &data["tasks"][0]["comments"][0];
    assert_eq!(comment["body"], "Mention the env vars.");
    assert_eq!(comment["author_label"], "Admin");

    // Completing is offered once; a second request changes nothing.
    let data = page_data(
        post(&test.app, &format!("/intern/tasks/{task_id}/complete"), Some(&intern)).await,
    )
    .await;
    assert_eq!(data["tasks"][0]["status"], "completed");
    assert_eq!(data["tasks"][0]["can_mark_complete"], false);
    assert_eq!(data["summary"], "1 of 1 tasks completed");

    let data = page_data(
        post(&test.app, &format!("/intern/tasks/{task_id}/complete"), Some(&intern)).await,
    )
    .await;
    assert_eq!(data["tasks"][0]["status"], "completed");
    assert!(data["error"].is_null());

    // The admin task list reflects the intern's update.
    let data = page_data(get(&test.app, "/admin/tasks", Some(&admin)).await).await;
    assert_eq!(data["tasks"][0]["status"], "completed");
}

#[tokio::test]
async fn intern_screen_assigns_new_tasks_to_selected_intern() {
    let test = build_test_app().await;
    let admin = admin_token(&test.app).await;
    let project_id = create_project(&test.app, &admin, "Onboarding").await;

    let data = page_data(post(&test.app, "/admin/interns/tasks/modal/new", Some(&admin)).await).await;
    assert!(data["selected_intern"].is_null());
    let data = page_data(
        post_json(
            &test.app,
            "/admin/interns/tasks/save",
            Some(&admin),
            json!({ "title": "Pair on review", "project_id": project_id.to_string() }),
        )
        .await,
    )
    .await;
    assert_eq!(data["error"], "Please select an intern first");

    post(&test.app, &format!("/admin/interns/select/{}", test.intern_id), Some(&admin)).await;
    post(&test.app, "/admin/interns/tasks/modal/new", Some(&admin)).await;
    let data = page_data(
        post_json(
            &test.app,
            "/admin/interns/tasks/save",
            Some(&admin),
            json!({ "title": "Pair on review", "project_id": project_id.to_string() }),
        )
        .await,
    )
    .await;
    assert_eq!(data["success"], "Task created successfully!");
    assert_eq!(data["tasks"][0]["assignee_id"], test.intern_id.to_string());
    assert_eq!(data["tasks"][0]["title"], "Pair on review");
}

#[tokio::test]
async fn intern_only_sees_own_tasks() {
    let test = build_test_app().await;
    let other_id = test
        .backend
        .seed_user(
            "other@example.com",
            "other-pass",
            internhub_core::roles::Role::Intern,
            Some("Olga Other"),
        )
        .await;
    let admin = admin_token(&test.app).await;
    let project_id = create_project(&test.app, &admin, "Onboarding").await;

    for (title, assignee) in [("Mine", test.intern_id), ("Theirs", other_id)] {
        post_json(
            &test.app,
            "/admin/tasks/save",
            Some(&admin),
            json!({
                "title": title,
                "project_id": project_id.to_string(),
                "assignee_id": assignee.to_string(),
            }),
        )
        .await;
    }

    let intern = intern_token(&test.app).await;
    let data = page_data(get(&test.app, "/intern/tasks", Some(&intern)).await).await;
    let titles: Vec<&str> = data["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Mine"]);
}
