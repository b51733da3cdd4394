//! Repository for the `projects` table.

use internhub_core::error::CoreError;
use internhub_core::session::SessionContext;
use internhub_core::types::EntityId;
use internhub_core::validation::validate_project_title;

use crate::backend::Store;
use crate::models::project::{CreateProject, Project, ProjectInput, ProjectRef, UpdateProject, TABLE};
use crate::query::{Filter, Select};
use crate::repositories::non_blank;

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// All projects, most recently created first.
    pub async fn list(store: &Store, session: &SessionContext) -> Result<Vec<Project>, CoreError> {
        let query = Select::from(TABLE).order_desc("created_at");
        Ok(store.fetch(&session.access_token, &query).await?)
    }

    /// `id, title` pairs ordered by title, for task form pick-lists.
    pub async fn list_options(
        store: &Store,
        session: &SessionContext,
    ) -> Result<Vec<ProjectRef>, CoreError> {
        let query = Select::from(TABLE)
            .columns(&["id", "title"])
            .order_asc("title");
        Ok(store.fetch(&session.access_token, &query).await?)
    }

    pub async fn find_by_id(
        store: &Store,
        session: &SessionContext,
        id: EntityId,
    ) -> Result<Option<Project>, CoreError> {
        let query = Select::from(TABLE).eq("id", id.to_string());
        Ok(store.fetch_optional(&session.access_token, &query).await?)
    }

    /// Insert a project, stamping the session's user as creator.
    pub async fn create(
        store: &Store,
        session: &SessionContext,
        input: &ProjectInput,
    ) -> Result<Project, CoreError> {
        validate_project_title(&input.title)?;
        let row = CreateProject {
            title: input.title.trim(),
            description: non_blank(input.description.as_deref()),
            status: input.status,
            created_by: session.user_id,
        };
        let project: Project = store.insert_row(&session.access_token, TABLE, &row).await?;
        tracing::info!(project_id = %project.id, user_id = %session.user_id, "Project created");
        Ok(project)
    }

    pub async fn update(
        store: &Store,
        session: &SessionContext,
        id: EntityId,
        input: &ProjectInput,
    ) -> Result<Project, CoreError> {
        validate_project_title(&input.title)?;
        let patch = UpdateProject {
            title: input.title.trim(),
            description: non_blank(input.description.as_deref()),
            status: input.status,
        };
        let mut rows: Vec<Project> = store
            .update_rows(
                &session.access_token,
                TABLE,
                &[Filter::eq("id", id.to_string())],
                &patch,
            )
            .await?;
        rows.pop().ok_or(CoreError::NotFound {
            entity: "Project",
            id,
        })
    }

    /// Delete a project. Its tasks and their comments go with it.
    pub async fn delete(
        store: &Store,
        session: &SessionContext,
        id: EntityId,
    ) -> Result<(), CoreError> {
        let removed = store
            .delete_rows(&session.access_token, TABLE, &[Filter::eq("id", id.to_string())])
            .await?;
        if removed == 0 {
            return Err(CoreError::NotFound {
                entity: "Project",
                id,
            });
        }
        tracing::info!(project_id = %id, user_id = %session.user_id, "Project deleted");
        Ok(())
    }
}
