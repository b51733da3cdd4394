//! Task entity model and DTOs.

use std::str::FromStr;

use chrono::NaiveDate;
use internhub_core::status::TaskStatus;
use internhub_core::types::{Date, EntityId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::profile::ProfileRef;
use crate::models::project::Project;

pub const TABLE: &str = "tasks";

/// A row from the `tasks` table, with optional project and assignee embeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub project_id: EntityId,
    pub assignee_id: EntityId,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub due_date: Option<Date>,
    #[serde(default)]
    pub created_by: Option<EntityId>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(rename(serialize = "project", deserialize = "projects"), default)]
    pub project: Option<Project>,
    #[serde(rename(serialize = "assignee", deserialize = "profiles"), default)]
    pub assignee: Option<ProfileRef>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }
}

/// `project_id` plus the embedded project, for the intern project list.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskProjectLink {
    pub project_id: EntityId,
    #[serde(rename = "projects", default)]
    pub project: Option<Project>,
}

/// Form values for creating or editing a task.
///
/// Empty strings from the form are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub project_id: Option<EntityId>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub assignee_id: Option<EntityId>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub due_date: Option<Date>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateTask<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub project_id: EntityId,
    pub assignee_id: EntityId,
    pub status: TaskStatus,
    pub due_date: Option<Date>,
    pub created_by: EntityId,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdateTask<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub project_id: EntityId,
    pub assignee_id: EntityId,
    pub status: TaskStatus,
    pub due_date: Option<Date>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct StatusPatch {
    pub status: TaskStatus,
}

fn blank_as_none(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Accepts `null`, `""`, `"YYYY-MM-DD"` or a full timestamp (date part kept).
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = blank_as_none(Option::deserialize(deserializer)?) else {
        return Ok(None);
    };
    let day = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(Some)
        .map_err(serde::de::Error::custom)
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    blank_as_none(Option::deserialize(deserializer)?)
        .map(|s| EntityId::from_str(&s).map_err(serde::de::Error::custom))
        .transpose()
}
