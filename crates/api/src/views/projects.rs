//! Admin project screen: list, create / edit modal, confirmed delete.

use internhub_core::error::CoreError;
use internhub_core::session::SessionContext;
use internhub_core::types::EntityId;
use internhub_db::models::project::{Project, ProjectInput};
use internhub_db::repositories::ProjectRepo;
use internhub_db::Store;
use serde::Serialize;

use super::banner::{BannerView, Banners};
use super::{ConfirmPrompt, ModalMode, CONFIRM_DELETE_PROJECT};

pub const MSG_PROJECT_CREATED: &str = "Project created successfully!";
pub const MSG_PROJECT_UPDATED: &str = "Project updated successfully!";
pub const MSG_PROJECT_DELETED: &str = "Project deleted successfully!";

#[derive(Debug, Clone, Default)]
struct ProjectModal {
    editing: Option<EntityId>,
    form: ProjectInput,
}

#[derive(Debug, Default)]
pub struct ProjectsView {
    projects: Vec<Project>,
    modal: Option<ProjectModal>,
    pending_delete: Option<EntityId>,
    banners: Banners,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectModalView {
    pub mode: ModalMode,
    pub project_id: Option<EntityId>,
    pub form: ProjectInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectsPage {
    pub projects: Vec<Project>,
    pub modal: Option<ProjectModalView>,
    pub confirm_delete: Option<ConfirmPrompt>,
    #[serde(flatten)]
    pub banners: BannerView,
}

impl ProjectsView {
    /// Reload the project list. A failed load keeps the previous list and
    /// shows the error.
    pub async fn refresh(&mut self, store: &Store, session: &SessionContext) {
        match ProjectRepo::list(store, session).await {
            Ok(projects) => self.projects = projects,
            Err(e) => {
                tracing::warn!(user_id = %session.user_id, error = %e, "Failed to load projects");
                self.banners.error(e.user_message());
            }
        }
    }

    pub fn open_create(&mut self) {
        self.modal = Some(ProjectModal::default());
    }

    pub fn open_edit(&mut self, id: EntityId) -> Result<(), CoreError> {
        let project = self
            .projects
            .iter()
            .find(|p| p.id == id)
            .ok_or(CoreError::NotFound {
                entity: "Project",
                id,
            })?;
        self.modal = Some(ProjectModal {
            editing: Some(id),
            form: ProjectInput {
                title: project.title.clone(),
                description: project.description.clone(),
                status: project.status,
            },
        });
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Save the modal form: update when the modal was opened on a project,
    /// create otherwise.
    pub async fn submit(&mut self, store: &Store, session: &SessionContext, form: ProjectInput) {
        self.banners.clear();
        let editing = self.modal.as_ref().and_then(|m| m.editing);

        let result = match editing {
            Some(id) => ProjectRepo::update(store, session, id, &form)
                .await
                .map(|_| MSG_PROJECT_UPDATED),
            None => ProjectRepo::create(store, session, &form)
                .await
                .map(|_| MSG_PROJECT_CREATED),
        };

        match result {
            Ok(message) => {
                self.modal = None;
                self.banners.success(message);
                self.refresh(store, session).await;
            }
            Err(e) => {
                self.banners.error(e.user_message());
                self.modal = Some(ProjectModal { editing, form });
            }
        }
    }

    pub fn request_delete(&mut self, id: EntityId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the project awaiting confirmation, if any.
    pub async fn confirm_delete(&mut self, store: &Store, session: &SessionContext) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        self.banners.clear();
        match ProjectRepo::delete(store, session, id).await {
            Ok(()) => {
                self.banners.success(MSG_PROJECT_DELETED);
                self.refresh(store, session).await;
            }
            Err(e) => self.banners.error(e.user_message()),
        }
    }

    pub fn page(&mut self) -> ProjectsPage {
        ProjectsPage {
            projects: self.projects.clone(),
            modal: self.modal.as_ref().map(|m| ProjectModalView {
                mode: ModalMode::for_target(m.editing),
                project_id: m.editing,
                form: m.form.clone(),
            }),
            confirm_delete: self.pending_delete.map(|target_id| ConfirmPrompt {
                target_id,
                message: CONFIRM_DELETE_PROJECT,
            }),
            banners: self.banners.view(),
        }
    }
}
