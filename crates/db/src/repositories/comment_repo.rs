//! Repository for the `task_comments` table.

use internhub_core::error::CoreError;
use internhub_core::session::SessionContext;
use internhub_core::types::EntityId;
use internhub_core::validation::validate_comment_body;
use serde_json::Value;

use crate::backend::Store;
use crate::models::comment::{Comment, CreateComment, TABLE};
use crate::models::profile;
use crate::query::Select;

const AUTHOR_EMBED: &[&str] = &["full_name", "email", "role"];

pub struct CommentRepo;

impl CommentRepo {
    /// Comments on any of `task_ids` with their authors, newest first.
    ///
    /// An empty id list makes no request.
    pub async fn list_for_tasks(
        store: &Store,
        session: &SessionContext,
        task_ids: &[EntityId],
    ) -> Result<Vec<Comment>, CoreError> {
        if task_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Value> = task_ids.iter().map(|id| Value::String(id.to_string())).collect();
        let query = Select::from(TABLE)
            .embed(profile::TABLE, "user_id", AUTHOR_EMBED)
            .in_list("task_id", ids)
            .order_desc("created_at");
        Ok(store.fetch(&session.access_token, &query).await?)
    }

    /// Append a comment authored by the session's user.
    pub async fn create(
        store: &Store,
        session: &SessionContext,
        task_id: EntityId,
        body: &str,
    ) -> Result<Comment, CoreError> {
        validate_comment_body(body)?;
        let row = CreateComment {
            task_id,
            user_id: session.user_id,
            body: body.trim(),
        };
        let comment: Comment = store.insert_row(&session.access_token, TABLE, &row).await?;
        tracing::info!(comment_id = %comment.id, task_id = %task_id, "Comment added");
        Ok(comment)
    }
}
