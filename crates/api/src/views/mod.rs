//! Screen controllers.
//!
//! Each controller owns the loaded collections of one screen, its modal
//! and confirmation state, and its banners. Writes follow one contract:
//! clear the banners, write, then either show a success banner and reload
//! the affected collection from the store, or show the error and leave the
//! screen interactive. Controllers render to a serializable page model.

pub mod auth;
pub mod banner;
pub mod interns;
pub mod my_projects;
pub mod my_tasks;
pub mod projects;
pub mod registry;
pub mod task_form;
pub mod tasks;

use internhub_core::types::EntityId;
use internhub_db::models::comment::Comment;
use internhub_db::models::task::Task;
use internhub_db::workload::InternWorkload;
use serde::Serialize;

pub use registry::{SessionViews, ViewRegistry};

pub const CONFIRM_DELETE_PROJECT: &str =
    "Are you sure you want to delete this project? This will also delete all associated tasks.";
pub const CONFIRM_DELETE_TASK: &str =
    "Are you sure you want to delete this task? This action cannot be undone.";

/// Whether an open modal creates a new record or edits `target_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalMode {
    Create,
    Edit,
}

impl ModalMode {
    pub fn for_target(target: Option<EntityId>) -> Self {
        if target.is_some() {
            ModalMode::Edit
        } else {
            ModalMode::Create
        }
    }
}

/// A destructive action waiting for the user to confirm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmPrompt {
    pub target_id: EntityId,
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub author_label: String,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            author_label: comment.author_label(),
            comment: comment.clone(),
        }
    }
}

/// A task with its comment thread, as shown on the intern-facing lists.
#[derive(Debug, Clone, Serialize)]
pub struct TaskCard {
    #[serde(flatten)]
    pub task: Task,
    /// Offered only while the task is not completed.
    pub can_mark_complete: bool,
    pub comments: Vec<CommentView>,
}

pub(crate) fn task_cards(workload: &InternWorkload) -> Vec<TaskCard> {
    workload
        .tasks
        .iter()
        .map(|task| TaskCard {
            can_mark_complete: !task.is_completed(),
            comments: workload
                .comments_for(task.id)
                .iter()
                .map(CommentView::from)
                .collect(),
            task: task.clone(),
        })
        .collect()
}
