//! Project entity model and DTOs.

use internhub_core::status::ProjectStatus;
use internhub_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

pub const TABLE: &str = "projects";

/// A row from the `projects` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub created_by: Option<EntityId>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// `id, title` projection used by pick-lists and task embeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: EntityId,
    pub title: String,
}

/// Form values for creating or editing a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
}

/// Insert payload. `created_by` is stamped from the session.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateProject<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: ProjectStatus,
    pub created_by: EntityId,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdateProject<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: ProjectStatus,
}
