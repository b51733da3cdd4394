//! Handlers for the admin intern screen.

use axum::extract::{Path, State};
use axum::Json;
use internhub_core::types::EntityId;
use internhub_db::models::task::TaskInput;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::guard::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::interns::InternsPage;
use crate::views::registry::claim_for_write;

type PageResponse = AppResult<Json<DataResponse<InternsPage>>>;

/// Request body for `POST /admin/interns/comments/save`.
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub body: String,
}

/// GET /admin/interns
pub async fn page(State(state): State<AppState>, RequireAdmin(session): RequireAdmin) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = views.interns.lock().await;
    view.refresh(&state.store, &session).await;
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/interns/select/{id}
pub async fn select(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Path(id): Path<EntityId>,
) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.interns)?;
    view.select_intern(&state.store, &session, id).await?;
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/interns/tasks/modal/new
pub async fn open_task_create(State(state): State<AppState>, RequireAdmin(session): RequireAdmin) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.interns)?;
    view.open_task_create();
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/interns/tasks/modal/edit/{id}
pub async fn open_task_edit(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Path(id): Path<EntityId>,
) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.interns)?;
    view.open_task_edit(id)?;
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/interns/tasks/modal/close
pub async fn close_task_modal(State(state): State<AppState>, RequireAdmin(session): RequireAdmin) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.interns)?;
    view.close_task_modal();
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/interns/tasks/save
pub async fn save_task(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Json(form): Json<TaskInput>,
) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.interns)?;
    view.submit_task(&state.store, &session, form).await;
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/interns/tasks/generate
pub async fn generate(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Json(form): Json<TaskInput>,
) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.interns)?;
    view.generate_description(&state.generator, form).await;
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/interns/tasks/delete/request/{id}
pub async fn request_delete(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Path(id): Path<EntityId>,
) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.interns)?;
    view.request_delete(id);
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/interns/tasks/delete/confirm
pub async fn confirm_delete(State(state): State<AppState>, RequireAdmin(session): RequireAdmin) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.interns)?;
    view.confirm_delete(&state.store, &session).await;
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/interns/tasks/delete/cancel
pub async fn cancel_delete(State(state): State<AppState>, RequireAdmin(session): RequireAdmin) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.interns)?;
    view.cancel_delete();
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/interns/comments/modal/{task_id}
pub async fn open_comment(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Path(task_id): Path<EntityId>,
) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.interns)?;
    view.open_comment(task_id)?;
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/interns/comments/close
pub async fn close_comment(State(state): State<AppState>, RequireAdmin(session): RequireAdmin) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.interns)?;
    view.close_comment();
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/interns/comments/save
pub async fn save_comment(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Json(input): Json<CommentRequest>,
) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.interns)?;
    view.submit_comment(&state.store, &session, input.body).await;
    Ok(Json(DataResponse { data: view.page() }))
}
