//! Admin task screen: every task with its assignee and project, the task
//! modal with description drafting, and confirmed delete.

use internhub_core::error::CoreError;
use internhub_core::session::SessionContext;
use internhub_core::types::EntityId;
use internhub_db::models::profile::Profile;
use internhub_db::models::project::ProjectRef;
use internhub_db::models::task::{Task, TaskInput};
use internhub_db::repositories::{ProfileRepo, ProjectRepo, TaskRepo};
use internhub_db::Store;
use internhub_genai::DescriptionGenerator;
use serde::Serialize;

use super::banner::{BannerView, Banners, DELETE_ERROR_TTL};
use super::task_form::{TaskModal, TaskModalView};
use super::{ConfirmPrompt, CONFIRM_DELETE_TASK};

pub const MSG_TASK_CREATED: &str = "Task created successfully!";
pub const MSG_TASK_UPDATED: &str = "Task updated successfully!";
pub const MSG_TASK_DELETED: &str = "Task deleted successfully!";

#[derive(Debug, Default)]
pub struct TasksView {
    tasks: Vec<Task>,
    projects: Vec<ProjectRef>,
    interns: Vec<Profile>,
    modal: Option<TaskModal>,
    pending_delete: Option<EntityId>,
    banners: Banners,
}

#[derive(Debug, Clone, Serialize)]
pub struct TasksPage {
    pub tasks: Vec<Task>,
    /// Pick-list for the modal's project field.
    pub projects: Vec<ProjectRef>,
    /// Pick-list for the modal's assignee field.
    pub interns: Vec<Profile>,
    pub modal: Option<TaskModalView>,
    pub confirm_delete: Option<ConfirmPrompt>,
    #[serde(flatten)]
    pub banners: BannerView,
}

impl TasksView {
    /// Load tasks and both pick-lists concurrently.
    pub async fn refresh(&mut self, store: &Store, session: &SessionContext) {
        let (tasks, projects, interns) = tokio::join!(
            TaskRepo::list_all(store, session),
            ProjectRepo::list_options(store, session),
            ProfileRepo::list_interns(store, &session.access_token),
        );

        match tasks {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => self.load_failed("tasks", session, e),
        }
        match projects {
            Ok(projects) => self.projects = projects,
            Err(e) => self.load_failed("projects", session, e),
        }
        match interns {
            Ok(interns) => self.interns = interns,
            Err(e) => self.load_failed("interns", session, e.into()),
        }
    }

    async fn reload_tasks(&mut self, store: &Store, session: &SessionContext) {
        match TaskRepo::list_all(store, session).await {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => self.load_failed("tasks", session, e),
        }
    }

    fn load_failed(&mut self, what: &'static str, session: &SessionContext, err: CoreError) {
        tracing::warn!(user_id = %session.user_id, what, error = %err, "Failed to load task screen data");
        self.banners.error(err.user_message());
    }

    pub fn open_create(&mut self) {
        self.banners.clear();
        self.modal = Some(TaskModal::create(None));
    }

    pub fn open_edit(&mut self, id: EntityId) -> Result<(), CoreError> {
        let task = self
            .tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or(CoreError::NotFound { entity: "Task", id })?;
        self.banners.clear();
        self.modal = Some(TaskModal::edit(task));
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub async fn submit(&mut self, store: &Store, session: &SessionContext, form: TaskInput) {
        self.banners.clear();
        let editing = self.modal.as_ref().and_then(|m| m.editing);

        let result = match editing {
            Some(id) => TaskRepo::update(store, session, id, &form)
                .await
                .map(|_| MSG_TASK_UPDATED),
            None => TaskRepo::create(store, session, &form)
                .await
                .map(|_| MSG_TASK_CREATED),
        };

        match result {
            Ok(message) => {
                self.modal = None;
                self.banners.success(message);
                self.reload_tasks(store, session).await;
            }
            Err(e) => {
                self.banners.error(e.user_message());
                self.modal = Some(TaskModal { editing, form });
            }
        }
    }

    /// Draft a description from the submitted form values and put it into
    /// the open modal.
    pub async fn generate_description(&mut self, generator: &DescriptionGenerator, form: TaskInput) {
        let modal = self.modal.get_or_insert_with(TaskModal::default);
        modal.form = form;
        modal
            .generate_description(generator, &self.projects, &mut self.banners)
            .await;
    }

    pub fn request_delete(&mut self, id: EntityId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self, store: &Store, session: &SessionContext) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        self.banners.clear();
        match TaskRepo::delete(store, session, id).await {
            Ok(()) => {
                self.banners.success(MSG_TASK_DELETED);
                self.reload_tasks(store, session).await;
            }
            Err(e) => self.banners.error_for(e.user_message(), DELETE_ERROR_TTL),
        }
    }

    pub fn page(&mut self) -> TasksPage {
        TasksPage {
            tasks: self.tasks.clone(),
            projects: self.projects.clone(),
            interns: self.interns.clone(),
            modal: self.modal.as_ref().map(TaskModal::view),
            confirm_delete: self.pending_delete.map(|target_id| ConfirmPrompt {
                target_id,
                message: CONFIRM_DELETE_TASK,
            }),
            banners: self.banners.view(),
        }
    }
}
