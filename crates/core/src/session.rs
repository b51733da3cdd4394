//! The resolved identity threaded through guards and repository calls.

use serde::Serialize;

use crate::roles::Role;
use crate::types::EntityId;

/// Identity of the signed-in principal for the current navigation.
///
/// Resolved once per request from the access token and passed explicitly
/// to every repository call, which stamps `created_by` / `user_id` from it
/// and forwards the token so the store applies its row policies.
#[derive(Debug, Clone, Serialize)]
pub struct SessionContext {
    pub user_id: EntityId,
    pub email: Option<String>,
    pub role: Role,
    #[serde(skip_serializing)]
    pub access_token: String,
}

impl SessionContext {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}
