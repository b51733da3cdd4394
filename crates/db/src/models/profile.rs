//! Profile entity model and DTOs.

use internhub_core::roles::Role;
use internhub_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

pub const TABLE: &str = "profiles";

/// A row from the `profiles` table. `id` equals the auth user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: EntityId,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Profile {
    /// Full name, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or("Unknown")
    }
}

/// Profile columns embedded into task and comment rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRef {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// DTO for creating a profile during signup.
#[derive(Debug, Clone, Serialize)]
pub struct CreateProfile {
    pub id: EntityId,
    pub full_name: Option<String>,
    pub role: Role,
    pub email: Option<String>,
}

/// Role-only projection used when verifying a profile.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ProfileRole {
    pub role: Role,
}
