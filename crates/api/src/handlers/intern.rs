//! Handlers for the intern screens.

use axum::extract::{Path, State};
use axum::Json;
use internhub_core::types::EntityId;

use crate::error::AppResult;
use crate::middleware::guard::RequireIntern;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::my_projects::MyProjectsPage;
use crate::views::my_tasks::MyTasksPage;
use crate::views::registry::claim_for_write;

/// GET /intern/tasks
pub async fn my_tasks(
    State(state): State<AppState>,
    RequireIntern(session): RequireIntern,
) -> AppResult<Json<DataResponse<MyTasksPage>>> {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = views.my_tasks.lock().await;
    view.refresh(&state.store, &session).await;
    Ok(Json(DataResponse { data: view.page() }))
}

/// POST /intern/tasks/{id}/complete
pub async fn complete_task(
    State(state): State<AppState>,
    RequireIntern(session): RequireIntern,
    Path(id): Path<EntityId>,
) -> AppResult<Json<DataResponse<MyTasksPage>>> {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = claim_for_write(&views.my_tasks)?;
    view.mark_complete(&state.store, &session, id).await;
    Ok(Json(DataResponse { data: view.page() }))
}

/// GET /intern/projects
pub async fn my_projects(
    State(state): State<AppState>,
    RequireIntern(session): RequireIntern,
) -> AppResult<Json<DataResponse<MyProjectsPage>>> {
    let views = state.views.for_session(&session.access_token).await;
    let mut view = views.my_projects.lock().await;
    view.refresh(&state.store, &session).await;
    Ok(Json(DataResponse { data: view.page() }))
}
