//! Task comment model.

use internhub_core::roles::Role;
use internhub_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::models::profile::ProfileRef;

pub const TABLE: &str = "task_comments";

/// A row from `task_comments`, with the author's profile embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: EntityId,
    pub task_id: EntityId,
    pub user_id: EntityId,
    pub body: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(rename(serialize = "author", deserialize = "profiles"), default)]
    pub author: Option<ProfileRef>,
}

impl Comment {
    /// "Admin" for admin authors, otherwise name, email or "Unknown".
    pub fn author_label(&self) -> String {
        let Some(author) = &self.author else {
            return "Unknown".to_string();
        };
        if author.role == Some(Role::Admin) {
            return Role::Admin.display_name().to_string();
        }
        author
            .full_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(author.email.as_deref().filter(|e| !e.is_empty()))
            .unwrap_or("Unknown")
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateComment<'a> {
    pub task_id: EntityId,
    pub user_id: EntityId,
    pub body: &'a str,
}
