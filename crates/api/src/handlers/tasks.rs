//! Handlers for the admin task screen.

use axum::extract::{Path, State};
use axum::Json;
use internhub_core::types::EntityId;
use internhub_db::models::task::TaskInput;

use crate::error::AppResult;
use crate::middleware::guard::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::registry::claim_for_write;
use crate::views::tasks::TasksPage;

type PageResponse = AppResult<Json<DataResponse<TasksPage>>>;

/// GET /admin/tasks
pub async fn page(State(state): State<AppState>, RequireAdmin(session): RequireAdmin) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = views.tasks.lock().await;
    view.refresh(&state.store, &session).await;
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/tasks/modal/new
pub async fn open_create(State(state): State<AppState>, RequireAdmin(session): RequireAdmin) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.tasks)?;
    view.open_create();
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/tasks/modal/edit/{id}
pub async fn open_edit(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Path(id): Path<EntityId>,
) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.tasks)?;
    view.open_edit(id)?;
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/tasks/modal/close
pub async fn close_modal(State(state): State<AppState>, RequireAdmin(session): RequireAdmin) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.tasks)?;
    view.close_modal();
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/tasks/save
pub async fn save(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Json(form): Json<TaskInput>,
) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.tasks)?;
    view.submit(&state.store, &session, form).await;
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/tasks/generate
///
/// Drafts a description for the posted form values. The screen stays
/// claimed for the whole sweep, so saves posted meanwhile get a 409.
pub async fn generate(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Json(form): Json<TaskInput>,
) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.tasks)?;
    view.generate_description(&state.generator, form).await;
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/tasks/delete/request/{id}
pub async fn request_delete(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Path(id): Path<EntityId>,
) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.tasks)?;
    view.request_delete(id);
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/tasks/delete/confirm
pub async fn confirm_delete(State(state): State<AppState>, RequireAdmin(session): RequireAdmin) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.tasks)?;
    view.confirm_delete(&state.store, &session).await;
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/tasks/delete/cancel
pub async fn cancel_delete(State(state): State<AppState>, RequireAdmin(session): RequireAdmin) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.tasks)?;
    view.cancel_delete();
    Ok(Json(DataResponse { data: view.page() }))
}
