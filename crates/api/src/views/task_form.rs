//! Task modal state shared by the admin task screens.

use internhub_core::types::EntityId;
use internhub_core::validation::{validate_generation_title, MSG_GENERATION_TITLE_REQUIRED};
use internhub_db::models::project::ProjectRef;
use internhub_db::models::task::{Task, TaskInput};
use internhub_genai::DescriptionGenerator;
use serde::Serialize;

use super::banner::{Banners, GENERATION_ERROR_TTL};
use super::ModalMode;

pub const MSG_DESCRIPTION_GENERATED: &str = "Description generated successfully!";
pub const MSG_GENERATION_FAILED: &str = "Failed to generate description. Please try again.";

#[derive(Debug, Clone, Default)]
pub struct TaskModal {
    /// `Some` while editing an existing task.
    pub editing: Option<EntityId>,
    pub form: TaskInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskModalView {
    pub mode: ModalMode,
    pub task_id: Option<EntityId>,
    pub form: TaskInput,
}

impl TaskModal {
    pub fn create(assignee_id: Option<EntityId>) -> Self {
        Self {
            editing: None,
            form: TaskInput {
                assignee_id,
                ..TaskInput::default()
            },
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            editing: Some(task.id),
            form: TaskInput {
                title: task.title.clone(),
                description: task.description.clone(),
                project_id: Some(task.project_id),
                assignee_id: Some(task.assignee_id),
                status: task.status,
                due_date: task.due_date,
            },
        }
    }

    pub fn view(&self) -> TaskModalView {
        TaskModalView {
            mode: ModalMode::for_target(self.editing),
            task_id: self.editing,
            form: self.form.clone(),
        }
    }

    /// Draft a description for the current form values.
    ///
    /// The form's project id is resolved to a title from `projects` so the
    /// prompt can name it. On success the description field is replaced.
    pub async fn generate_description(
        &mut self,
        generator: &DescriptionGenerator,
        projects: &[ProjectRef],
        banners: &mut Banners,
    ) {
        banners.clear();
        if validate_generation_title(&self.form.title).is_err() {
            banners.error(MSG_GENERATION_TITLE_REQUIRED);
            return;
        }

        let project_title = self
            .form
            .project_id
            .and_then(|id| projects.iter().find(|p| p.id == id))
            .map(|p| p.title.as_str());

        match generator
            .generate_description(&self.form.title, project_title)
            .await
        {
            Ok(text) => {
                self.form.description = Some(text);
                banners.success(MSG_DESCRIPTION_GENERATED);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Description generation failed");
                let message = e.to_string();
                if message.is_empty() {
                    banners.error_for(MSG_GENERATION_FAILED, GENERATION_ERROR_TTL);
                } else {
                    banners.error_for(message, GENERATION_ERROR_TTL);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use internhub_core::status::TaskStatus;

    use super::*;

    #[tokio::test]
    async fn blank_title_is_rejected_before_generation() {
        let mut modal = TaskModal::create(None);
        modal.form.title = "   ".into();
        let mut banners = Banners::default();

        modal
            .generate_description(&DescriptionGenerator::disabled(), &[], &mut banners)
            .await;

        assert_eq!(
            banners.view().error.as_deref(),
            Some(MSG_GENERATION_TITLE_REQUIRED)
        );
        assert!(modal.form.description.is_none());
    }

    #[tokio::test]
    async fn unconfigured_generator_reports_its_error() {
        let mut modal = TaskModal::create(None);
        modal.form.title = "Write README".into();
        modal.form.description = Some("keep me".into());
        let mut banners = Banners::default();

        modal
            .generate_description(&DescriptionGenerator::disabled(), &[], &mut banners)
            .await;

        let error = banners.view().error.unwrap();
        assert!(error.contains("not configured"));
        assert_eq!(modal.form.description.as_deref(), Some("keep me"));
    }

    #[test]
    fn edit_prefills_every_field() {
        let id = EntityId::from_str("5a0c8f6e-63c2-4b55-9a1e-0c4a1b2c3d4e").unwrap();
        let task = Task {
            id,
            title: "Write README".into(),
            description: Some("docs".into()),
            project_id: EntityId::new_v4(),
            assignee_id: EntityId::new_v4(),
            status: TaskStatus::InProgress,
            due_date: None,
            created_by: None,
            created_at: None,
            project: None,
            assignee: None,
        };
        let modal = TaskModal::edit(&task);
        let view = modal.view();
        assert_eq!(view.mode, ModalMode::Edit);
        assert_eq!(view.task_id, Some(id));
        assert_eq!(view.form.project_id, Some(task.project_id));
        assert_eq!(view.form.status, TaskStatus::InProgress);
    }
}
