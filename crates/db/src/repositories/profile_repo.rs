//! Repository for the `profiles` table.
//!
//! Returns [`StoreError`] rather than a domain error: the identity
//! resolver and the signup flow branch on the store's error codes.

use internhub_core::roles::Role;
use internhub_core::types::EntityId;
use serde_json::json;

use crate::backend::Store;
use crate::error::StoreError;
use crate::models::profile::{CreateProfile, Profile, ProfileRole, TABLE};
use crate::query::{Filter, Select};

const COLUMNS: &[&str] = &["id", "full_name", "email", "role", "created_at"];

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find_by_id(
        store: &Store,
        access_token: &str,
        id: EntityId,
    ) -> Result<Option<Profile>, StoreError> {
        let query = Select::from(TABLE).columns(COLUMNS).eq("id", id.to_string());
        store.fetch_optional(access_token, &query).await
    }

    pub async fn find_role(
        store: &Store,
        access_token: &str,
        id: EntityId,
    ) -> Result<Option<Role>, StoreError> {
        let query = Select::from(TABLE).columns(&["role"]).eq("id", id.to_string());
        let row: Option<ProfileRole> = store.fetch_optional(access_token, &query).await?;
        Ok(row.map(|r| r.role))
    }

    /// All intern profiles ordered by name.
    pub async fn list_interns(store: &Store, access_token: &str) -> Result<Vec<Profile>, StoreError> {
        let query = Select::from(TABLE)
            .columns(COLUMNS)
            .eq("role", Role::Intern.as_str())
            .order_asc("full_name");
        store.fetch(access_token, &query).await
    }

    pub async fn create(
        store: &Store,
        access_token: &str,
        input: &CreateProfile,
    ) -> Result<Profile, StoreError> {
        store.insert_row(access_token, TABLE, input).await
    }

    /// Returns the number of profiles changed (0 when the row is not
    /// visible to the caller).
    pub async fn update_role(
        store: &Store,
        access_token: &str,
        id: EntityId,
        role: Role,
    ) -> Result<usize, StoreError> {
        let rows: Vec<Profile> = store
            .update_rows(
                access_token,
                TABLE,
                &[Filter::eq("id", id.to_string())],
                &json!({ "role": role }),
            )
            .await?;
        Ok(rows.len())
    }
}
