//! Handlers for the admin project screen.

use axum::extract::{Path, State};
use axum::Json;
use internhub_core::types::EntityId;
use internhub_db::models::project::ProjectInput;

use crate::error::AppResult;
use crate::middleware::guard::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::projects::ProjectsPage;
use crate::views::registry::claim_for_write;

type PageResponse = AppResult<Json<DataResponse<ProjectsPage>>>;

/// GET /admin/projects
pub async fn page(State(state): State<AppState>, RequireAdmin(session): RequireAdmin) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = views.projects.lock().await;
    view.refresh(&state.store, &session).await;
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/projects/modal/new
pub async fn open_create(State(state): State<AppState>, RequireAdmin(session): RequireAdmin) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.projects)?;
    view.open_create();
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/projects/modal/edit/{id}
pub async fn open_edit(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Path(id): Path<EntityId>,
) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.projects)?;
    view.open_edit(id)?;
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/projects/modal/close
pub async fn close_modal(State(state): State<AppState>, RequireAdmin(session): RequireAdmin) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.projects)?;
    view.close_modal();
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/projects/save
pub async fn save(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Json(form): Json<ProjectInput>,
) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.projects)?;
    view.submit(&state.store, &session, form).await;
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/projects/delete/request/{id}
pub async fn request_delete(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Path(id): Path<EntityId>,
) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.projects)?;
    view.request_delete(id);
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/projects/delete/confirm
pub async fn confirm_delete(State(state): State<AppState>, RequireAdmin(session): RequireAdmin) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.projects)?;
    view.confirm_delete(&state.store, &session).await;
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /admin/projects/delete/cancel
pub async fn cancel_delete(State(state): State<AppState>, RequireAdmin(session): RequireAdmin) -> PageResponse {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.projects)?;
    view.cancel_delete();
    Ok(Json(DataResponse { data: view.page() }))
}
