//! Repository for the `tasks` table.

use internhub_core::error::CoreError;
use internhub_core::session::SessionContext;
use internhub_core::status::TaskStatus;
use internhub_core::types::EntityId;
use internhub_core::validation::validate_task_fields;

use crate::backend::Store;
use crate::models::profile;
use crate::models::project;
use crate::models::task::{
    CreateTask, StatusPatch, Task, TaskInput, TaskProjectLink, UpdateTask, TABLE,
};
use crate::query::{Filter, Select};
use crate::repositories::non_blank;

const ASSIGNEE_EMBED: &[&str] = &["full_name", "email"];
const PROJECT_REF_EMBED: &[&str] = &["id", "title"];
const PROJECT_FULL_EMBED: &[&str] = &["id", "title", "description", "status", "created_at"];

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Every visible task with its assignee and project, newest first.
    pub async fn list_all(store: &Store, session: &SessionContext) -> Result<Vec<Task>, CoreError> {
        let query = Select::from(TABLE)
            .embed(profile::TABLE, "assignee_id", ASSIGNEE_EMBED)
            .embed(project::TABLE, "project_id", PROJECT_REF_EMBED)
            .order_desc("created_at");
        Ok(store.fetch(&session.access_token, &query).await?)
    }

    /// Tasks assigned to one intern with their projects, newest first.
    pub async fn list_for_assignee(
        store: &Store,
        session: &SessionContext,
        assignee_id: EntityId,
    ) -> Result<Vec<Task>, CoreError> {
        let query = Select::from(TABLE)
            .embed(project::TABLE, "project_id", PROJECT_FULL_EMBED)
            .eq("assignee_id", assignee_id.to_string())
            .order_desc("created_at");
        Ok(store.fetch(&session.access_token, &query).await?)
    }

    /// Just the project references of an intern's tasks.
    pub async fn list_project_links_for_assignee(
        store: &Store,
        session: &SessionContext,
        assignee_id: EntityId,
    ) -> Result<Vec<TaskProjectLink>, CoreError> {
        let query = Select::from(TABLE)
            .columns(&["project_id"])
            .embed(project::TABLE, "project_id", PROJECT_FULL_EMBED)
            .eq("assignee_id", assignee_id.to_string())
            .order_desc("created_at");
        Ok(store.fetch(&session.access_token, &query).await?)
    }

    pub async fn find_by_id(
        store: &Store,
        session: &SessionContext,
        id: EntityId,
    ) -> Result<Option<Task>, CoreError> {
        let query = Select::from(TABLE)
            .embed(project::TABLE, "project_id", PROJECT_REF_EMBED)
            .eq("id", id.to_string());
        Ok(store.fetch_optional(&session.access_token, &query).await?)
    }

    /// Insert a task. Title, project and assignee are checked before any
    /// request is made.
    pub async fn create(
        store: &Store,
        session: &SessionContext,
        input: &TaskInput,
    ) -> Result<Task, CoreError> {
        let (project_id, assignee_id) = required_refs(input)?;
        let row = CreateTask {
            title: input.title.trim(),
            description: non_blank(input.description.as_deref()),
            project_id,
            assignee_id,
            status: input.status,
            due_date: input.due_date,
            created_by: session.user_id,
        };
        let task: Task = store.insert_row(&session.access_token, TABLE, &row).await?;
        tracing::info!(
            task_id = %task.id,
            project_id = %project_id,
            assignee_id = %assignee_id,
            "Task created"
        );
        Ok(task)
    }

    pub async fn update(
        store: &Store,
        session: &SessionContext,
        id: EntityId,
        input: &TaskInput,
    ) -> Result<Task, CoreError> {
        let (project_id, assignee_id) = required_refs(input)?;
        let patch = UpdateTask {
            title: input.title.trim(),
            description: non_blank(input.description.as_deref()),
            project_id,
            assignee_id,
            status: input.status,
            due_date: input.due_date,
        };
        let mut rows: Vec<Task> = store
            .update_rows(&session.access_token, TABLE, &by_id(id), &patch)
            .await?;
        rows.pop().ok_or(CoreError::NotFound { entity: "Task", id })
    }

    /// Set a task's status to completed. Completing an already completed
    /// task succeeds and changes nothing.
    pub async fn mark_completed(
        store: &Store,
        session: &SessionContext,
        id: EntityId,
    ) -> Result<Task, CoreError> {
        let patch = StatusPatch {
            status: TaskStatus::Completed,
        };
        let mut rows: Vec<Task> = store
            .update_rows(&session.access_token, TABLE, &by_id(id), &patch)
            .await?;
        let task = rows.pop().ok_or(CoreError::NotFound { entity: "Task", id })?;
        tracing::info!(task_id = %id, user_id = %session.user_id, "Task marked completed");
        Ok(task)
    }

    pub async fn delete(
        store: &Store,
        session: &SessionContext,
        id: EntityId,
    ) -> Result<(), CoreError> {
        let removed = store
            .delete_rows(&session.access_token, TABLE, &by_id(id))
            .await?;
        if removed == 0 {
            return Err(CoreError::NotFound { entity: "Task", id });
        }
        tracing::info!(task_id = %id, user_id = %session.user_id, "Task deleted");
        Ok(())
    }
}

fn by_id(id: EntityId) -> [Filter; 1] {
    [Filter::eq("id", id.to_string())]
}

fn required_refs(input: &TaskInput) -> Result<(EntityId, EntityId), CoreError> {
    validate_task_fields(&input.title, input.project_id, input.assignee_id)?;
    match (input.project_id, input.assignee_id) {
        (Some(project_id), Some(assignee_id)) => Ok((project_id, assignee_id)),
        _ => Err(CoreError::Validation(
            internhub_core::validation::MSG_TASK_FIELDS_REQUIRED.to_string(),
        )),
    }
}
