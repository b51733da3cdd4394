//! Route definitions for the admin screens.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{dashboard, interns, projects, tasks};
use crate::state::AppState;

/// Routes mounted at `/admin`. Every route requires an admin session.
///
/// ```text
/// GET    /                                        -> dashboard::admin
///
/// GET    /projects                                -> projects::page
/// POST   /projects/modal/new                      -> projects::open_create
/// POST   /projects/modal/edit/{id}                -> projects::open_edit
/// POST   /projects/modal/close                    -> projects::close_modal
/// POST   /projects/save                           -> projects::save
/// POST   /projects/delete/request/{id}            -> projects::request_delete
/// POST   /projects/delete/confirm                 -> projects::confirm_delete
/// POST   /projects/delete/cancel                  -> projects::cancel_delete
///
/// GET    /tasks                                   -> tasks::page
/// POST   /tasks/modal/new                         -> tasks::open_create
/// POST   /tasks/modal/edit/{id}                   -> tasks::open_edit
/// POST   /tasks/modal/close                       -> tasks::close_modal
/// POST   /tasks/save                              -> tasks::save
/// POST   /tasks/generate                          -> tasks::generate
/// POST   /tasks/delete/request/{id}               -> tasks::request_delete
/// POST   /tasks/delete/confirm                    -> tasks::confirm_delete
/// POST   /tasks/delete/cancel                     -> tasks::cancel_delete
///
/// GET    /interns                                 -> interns::page
/// POST   /interns/select/{id}                     -> interns::select
/// POST   /interns/tasks/modal/new                 -> interns::open_task_create
/// POST   /interns/tasks/modal/edit/{id}           -> interns::open_task_edit
/// POST   /interns/tasks/modal/close               -> interns::close_task_modal
/// POST   /interns/tasks/save                      -> interns::save_task
/// POST   /interns/tasks/generate                  -> interns::generate
/// POST   /interns/tasks/delete/request/{id}       -> interns::request_delete
/// POST   /interns/tasks/delete/confirm            -> interns::confirm_delete
/// POST   /interns/tasks/delete/cancel             -> interns::cancel_delete
/// POST   /interns/comments/modal/{task_id}        -> interns::open_comment
/// POST   /interns/comments/close                  -> interns::close_comment
/// POST   /interns/comments/save                   -> interns::save_comment
/// ```
pub fn router() -> Router<AppState> {
    let project_routes = Router::new()
        .route("/", get(projects::page))
        .route("/modal/new", post(projects::open_create))
        .route("/modal/edit/{id}", post(projects::open_edit))
        .route("/modal/close", post(projects::close_modal))
        .route("/save", post(projects::save))
        .route("/delete/request/{id}", post(projects::request_delete))
        .route("/delete/confirm", post(projects::confirm_delete))
        .route("/delete/cancel", post(projects::cancel_delete));

    let task_routes = Router::new()
        .route("/", get(tasks::page))
        .route("/modal/new", post(tasks::open_create))
        .route("/modal/edit/{id}", post(tasks::open_edit))
        .route("/modal/close", post(tasks::close_modal))
        .route("/save", post(tasks::save))
        .route("/generate", post(tasks::generate))
        .route("/delete/request/{id}", post(tasks::request_delete))
        .route("/delete/confirm", post(tasks::confirm_delete))
        .route("/delete/cancel", post(tasks::cancel_delete));

    let intern_routes = Router::new()
        .route("/", get(interns::page))
        .route("/select/{id}", post(interns::select))
        .route("/tasks/modal/new", post(interns::open_task_create))
        .route("/tasks/modal/edit/{id}", post(interns::open_task_edit))
        .route("/tasks/modal/close", post(interns::close_task_modal))
        .route("/tasks/save", post(interns::save_task))
        .route("/tasks/generate", post(interns::generate))
        .route("/tasks/delete/request/{id}", post(interns::request_delete))
        .route("/tasks/delete/confirm", post(interns::confirm_delete))
        .route("/tasks/delete/cancel", post(interns::cancel_delete))
        .route("/comments/modal/{task_id}", post(interns::open_comment))
        .route("/comments/close", post(interns::close_comment))
        .route("/comments/save", post(interns::save_comment));

    Router::new()
        .route("/", get(dashboard::admin))
        .nest("/projects", project_routes)
        .nest("/tasks", task_routes)
        .nest("/interns", intern_routes)
}
