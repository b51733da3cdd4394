//! Admin intern screen: pick an intern, then manage their tasks and the
//! comment threads on them.

use internhub_core::error::CoreError;
use internhub_core::session::SessionContext;
use internhub_core::types::EntityId;
use internhub_db::models::profile::Profile;
use internhub_db::models::project::{Project, ProjectRef};
use internhub_db::models::task::TaskInput;
use internhub_db::repositories::{CommentRepo, ProfileRepo, ProjectRepo, TaskRepo};
use internhub_db::workload::{load_intern_workload, InternWorkload};
use internhub_db::Store;
use internhub_genai::DescriptionGenerator;
use serde::Serialize;

use super::banner::{BannerView, Banners};
use super::task_form::{TaskModal, TaskModalView};
use super::tasks::{MSG_TASK_CREATED, MSG_TASK_DELETED, MSG_TASK_UPDATED};
use super::{task_cards, ConfirmPrompt, TaskCard};

pub const CONFIRM_DELETE_INTERN_TASK: &str = "Are you sure you want to delete this task?";
pub const MSG_INTERNS_PERMISSION_DENIED: &str =
    "Permission denied. Please ensure RLS policies allow admins to view all profiles.";
pub const MSG_SELECT_INTERN_FIRST: &str = "Please select an intern first";

#[derive(Debug, Clone)]
struct CommentModal {
    task_id: EntityId,
    body: String,
}

#[derive(Debug, Default)]
pub struct InternsView {
    interns: Vec<Profile>,
    projects: Vec<ProjectRef>,
    selected: Option<Profile>,
    workload: InternWorkload,
    task_modal: Option<TaskModal>,
    comment_modal: Option<CommentModal>,
    pending_delete: Option<EntityId>,
    banners: Banners,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentModalView {
    pub task_id: EntityId,
    pub task_title: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InternsPage {
    pub interns: Vec<Profile>,
    pub projects: Vec<ProjectRef>,
    pub selected_intern: Option<Profile>,
    /// The selected intern's tasks, newest first, with comments.
    pub tasks: Vec<TaskCard>,
    /// Distinct projects among the selected intern's tasks.
    pub intern_projects: Vec<Project>,
    pub task_modal: Option<TaskModalView>,
    pub comment_modal: Option<CommentModalView>,
    pub confirm_delete: Option<ConfirmPrompt>,
    #[serde(flatten)]
    pub banners: BannerView,
}

impl InternsView {
    /// Load the intern list and the project pick-list. When an intern is
    /// selected, their workload is reloaded too.
    pub async fn refresh(&mut self, store: &Store, session: &SessionContext) {
        let (interns, projects) = tokio::join!(
            ProfileRepo::list_interns(store, &session.access_token),
            ProjectRepo::list_options(store, session),
        );

        match interns {
            Ok(interns) => self.interns = interns,
            Err(e) => {
                tracing::warn!(user_id = %session.user_id, error = %e, "Failed to load interns");
                let message = if e.is_permission_denied() {
                    MSG_INTERNS_PERMISSION_DENIED.to_string()
                } else {
                    format!("Failed to load interns: {e}")
                };
                self.banners.error(message);
                self.interns.clear();
            }
        }
        // The project pick-list is best effort.
        match projects {
            Ok(projects) => self.projects = projects,
            Err(e) => tracing::warn!(error = %e, "Failed to load project options"),
        }

        if self.selected.is_some() {
            self.reload_workload(store, session).await;
        }
    }

    /// Make `intern_id` the master row and fetch their tasks, then the
    /// comments on those tasks. The intern list is reloaded first when it
    /// does not know `intern_id`.
    pub async fn select_intern(
        &mut self,
        store: &Store,
        session: &SessionContext,
        intern_id: EntityId,
    ) -> Result<(), CoreError> {
        if !self.interns.iter().any(|i| i.id == intern_id) {
            self.refresh(store, session).await;
        }
        let intern = self
            .interns
            .iter()
            .find(|i| i.id == intern_id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "Intern",
                id: intern_id,
            })?;
        self.selected = Some(intern);
        self.task_modal = None;
        self.comment_modal = None;
        self.pending_delete = None;
        self.reload_workload(store, session).await;
        Ok(())
    }

    async fn reload_workload(&mut self, store: &Store, session: &SessionContext) {
        let Some(intern_id) = self.selected.as_ref().map(|i| i.id) else {
            return;
        };
        match load_intern_workload(store, session, intern_id).await {
            Ok(workload) => self.workload = workload,
            Err(e) => {
                tracing::warn!(intern_id = %intern_id, error = %e, "Failed to load intern tasks");
                self.workload = InternWorkload::default();
            }
        }
    }

    fn selected_id(&self) -> Option<EntityId> {
        self.selected.as_ref().map(|i| i.id)
    }

    // ---- task modal ----

    pub fn open_task_create(&mut self) {
        self.banners.clear();
        self.task_modal = Some(TaskModal::create(self.selected_id()));
    }

    pub fn open_task_edit(&mut self, task_id: EntityId) -> Result<(), CoreError> {
        let task = self
            .workload
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .ok_or(CoreError::NotFound {
                entity: "Task",
                id: task_id,
            })?;
        self.banners.clear();
        self.task_modal = Some(TaskModal::edit(task));
        Ok(())
    }

    pub fn close_task_modal(&mut self) {
        self.task_modal = None;
    }

    /// Save the task modal. New tasks are always assigned to the selected
    /// intern.
    pub async fn submit_task(&mut self, store: &Store, session: &SessionContext, mut form: TaskInput) {
        self.banners.clear();
        let Some(intern_id) = self.selected_id() else {
            self.banners.error(MSG_SELECT_INTERN_FIRST);
            return;
        };
        let editing = self.task_modal.as_ref().and_then(|m| m.editing);
        if editing.is_none() || form.assignee_id.is_none() {
            form.assignee_id = Some(intern_id);
        }

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
                self.task_modal = None;
                self.banners.success(message);
                self.reload_workload(store, session).await;
            }
            Err(e) => {
                self.banners.error(e.user_message());
                self.task_modal = Some(TaskModal { editing, form });
            }
        }
    }

    pub async fn generate_description(&mut self, generator: &DescriptionGenerator, form: TaskInput) {
        let assignee = self.selected_id();
        let modal = self
            .task_modal
            .get_or_insert_with(|| TaskModal::create(assignee));
        modal.form = form;
        modal
            .generate_description(generator, &self.projects, &mut self.banners)
            .await;
    }

    // ---- delete ----

    pub fn request_delete(&mut self, task_id: EntityId) {
        self.pending_delete = Some(task_id);
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
                self.reload_workload(store, session).await;
            }
            Err(e) => self.banners.error(e.user_message()),
        }
    }

    // ---- comments ----

    pub fn open_comment(&mut self, task_id: EntityId) -> Result<(), CoreError> {
        if !self.workload.tasks.iter().any(|t| t.id == task_id) {
            return Err(CoreError::NotFound {
                entity: "Task",
                id: task_id,
            });
        }
        self.banners.clear_error();
        self.comment_modal = Some(CommentModal {
            task_id,
            body: String::new(),
        });
        Ok(())
    }

    pub fn close_comment(&mut self) {
        self.comment_modal = None;
    }

    /// Post the comment modal's body on its task. The thread is reloaded on
    /// success; no success banner is shown.
    pub async fn submit_comment(&mut self, store: &Store, session: &SessionContext, body: String) {
        self.banners.clear_error();
        let Some(task_id) = self.comment_modal.as_ref().map(|m| m.task_id) else {
            return;
        };
        match CommentRepo::create(store, session, task_id, &body).await {
            Ok(_) => {
                self.comment_modal = None;
                self.reload_workload(store, session).await;
            }
            Err(e) => {
                self.banners.error(e.user_message());
                self.comment_modal = Some(CommentModal { task_id, body });
            }
        }
    }

    pub fn page(&mut self) -> InternsPage {
        InternsPage {
            interns: self.interns.clone(),
            projects: self.projects.clone(),
            selected_intern: self.selected.clone(),
            tasks: task_cards(&self.workload),
            intern_projects: self.workload.projects(),
            task_modal: self.task_modal.as_ref().map(TaskModal::view),
            comment_modal: self.comment_modal.as_ref().map(|m| CommentModalView {
                task_id: m.task_id,
                task_title: self
                    .workload
                    .tasks
                    .iter()
                    .find(|t| t.id == m.task_id)
                    .map(|t| t.title.clone()),
                body: m.body.clone(),
            }),
            confirm_delete: self.pending_delete.map(|target_id| ConfirmPrompt {
                target_id,
                message: CONFIRM_DELETE_INTERN_TASK,
            }),
            banners: self.banners.view(),
        }
    }
}
