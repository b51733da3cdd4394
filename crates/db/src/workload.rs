//! Dependent fetches behind the intern views: tasks first, then comments
//! keyed by the loaded task ids.

use std::collections::HashMap;

use internhub_core::derived::{dedup_by_key, group_by_key, CompletionSummary};
use internhub_core::error::CoreError;
use internhub_core::session::SessionContext;
use internhub_core::types::EntityId;

use crate::backend::Store;
use crate::models::comment::Comment;
use crate::models::project::Project;
use crate::models::task::{Task, TaskProjectLink};
use crate::repositories::{CommentRepo, TaskRepo};

/// One intern's tasks and the comments on them.
#[derive(Debug, Clone, Default)]
pub struct InternWorkload {
    pub tasks: Vec<Task>,
    /// Newest first within each task.
    pub comments_by_task: HashMap<EntityId, Vec<Comment>>,
}

impl InternWorkload {
    pub fn comments_for(&self, task_id: EntityId) -> &[Comment] {
        self.comments_by_task
            .get(&task_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Distinct projects referenced by the tasks, first occurrence wins.
    pub fn projects(&self) -> Vec<Project> {
        distinct_projects(self.tasks.iter().filter_map(|t| t.project.clone()))
    }

    pub fn completion(&self) -> CompletionSummary {
        CompletionSummary::from_flags(self.tasks.iter().map(Task::is_completed))
    }
}

/// Load an intern's tasks, then the comments on those tasks.
///
/// The comment stage is skipped when there are no tasks. A failed comment
/// fetch is logged and leaves the tasks without comments.
pub async fn load_intern_workload(
    store: &Store,
    session: &SessionContext,
    intern_id: EntityId,
) -> Result<InternWorkload, CoreError> {
    let tasks = TaskRepo::list_for_assignee(store, session, intern_id).await?;
    if tasks.is_empty() {
        return Ok(InternWorkload::default());
    }

    let task_ids: Vec<EntityId> = tasks.iter().map(|t| t.id).collect();
    let comments = match CommentRepo::list_for_tasks(store, session, &task_ids).await {
        Ok(comments) => comments,
        Err(e) => {
            tracing::warn!(intern_id = %intern_id, error = %e, "Failed to load task comments");
            Vec::new()
        }
    };

    Ok(InternWorkload {
        tasks,
        comments_by_task: group_by_key(comments, |c| c.task_id),
    })
}

pub fn distinct_projects(projects: impl IntoIterator<Item = Project>) -> Vec<Project> {
    dedup_by_key(projects, |p| p.id)
}

/// Projects an intern can see through their task assignments.
pub async fn load_intern_projects(
    store: &Store,
    session: &SessionContext,
    intern_id: EntityId,
) -> Result<Vec<Project>, CoreError> {
    let links = TaskRepo::list_project_links_for_assignee(store, session, intern_id).await?;
    Ok(distinct_projects(
        links.into_iter().filter_map(|l: TaskProjectLink| l.project),
    ))
}
