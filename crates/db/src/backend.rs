//! The backend seam: an auth provider plus a row-policy-protected table
//! store, and the [`Store`] handle that repositories call through.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;
use crate::query::{Filter, Select};

// ---------------------------------------------------------------------------
// Auth provider types
// ---------------------------------------------------------------------------

/// A user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: internhub_core::types::EntityId,
    #[serde(default)]
    pub email: Option<String>,
    /// Free-form metadata supplied at signup (carries the chosen role).
    #[serde(default)]
    pub user_metadata: Value,
}

/// A signed-in session issued by the auth provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}

/// Result of a signup call. `session` is `None` while email confirmation
/// is pending.
#[derive(Debug, Clone, Default)]
pub struct SignUpOutcome {
    pub user: Option<AuthUser>,
    pub session: Option<AuthSession>,
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, StoreError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<SignUpOutcome, StoreError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), StoreError>;

    /// The user behind a token, or `None` when the token is no longer
    /// recognised.
    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, StoreError>;
}

/// Row access. `access_token` is `None` for anonymous requests; the store
/// applies its row policies to whichever principal the token names.
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn select(
        &self,
        access_token: Option<&str>,
        query: &Select,
    ) -> Result<Vec<Value>, StoreError>;

    /// Insert one row and return it as stored.
    async fn insert(
        &self,
        access_token: Option<&str>,
        table: &'static str,
        row: Value,
    ) -> Result<Value, StoreError>;

    /// Patch every visible row matching `filters`; returns the updated rows.
    async fn update(
        &self,
        access_token: Option<&str>,
        table: &'static str,
        filters: &[Filter],
        patch: Value,
    ) -> Result<Vec<Value>, StoreError>;

    /// Delete every visible row matching `filters`; returns the deleted rows.
    async fn delete(
        &self,
        access_token: Option<&str>,
        table: &'static str,
        filters: &[Filter],
    ) -> Result<Vec<Value>, StoreError>;

    async fn health(&self) -> Result<(), StoreError>;
}

pub trait Backend: AuthProvider + TableStore {}

impl<T: AuthProvider + TableStore> Backend for T {}

// ---------------------------------------------------------------------------
// Store handle
// ---------------------------------------------------------------------------

/// Cloneable handle over a shared backend.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn Backend>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    // ---- auth ----

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, StoreError> {
        self.backend.sign_in_with_password(email, password).await
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<SignUpOutcome, StoreError> {
        self.backend.sign_up(email, password, metadata).await
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), StoreError> {
        self.backend.sign_out(access_token).await
    }

    pub async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, StoreError> {
        self.backend.get_user(access_token).await
    }

    pub async fn health(&self) -> Result<(), StoreError> {
        self.backend.health().await
    }

    // ---- typed rows ----

    pub async fn fetch<T: DeserializeOwned>(
        &self,
        access_token: &str,
        query: &Select,
    ) -> Result<Vec<T>, StoreError> {
        let rows = self.backend.select(Some(access_token), query).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(StoreError::from))
            .collect()
    }

    /// First matching row, if any.
    pub async fn fetch_optional<T: DeserializeOwned>(
        &self,
        access_token: &str,
        query: &Select,
    ) -> Result<Option<T>, StoreError> {
        let mut rows = self.backend.select(Some(access_token), query).await?;
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(rows.swap_remove(0))?))
    }

    pub async fn insert_row<I: Serialize, T: DeserializeOwned>(
        &self,
        access_token: &str,
        table: &'static str,
        input: &I,
    ) -> Result<T, StoreError> {
        let row = self
            .backend
            .insert(Some(access_token), table, serde_json::to_value(input)?)
            .await?;
        Ok(serde_json::from_value(row)?)
    }

    pub async fn update_rows<P: Serialize, T: DeserializeOwned>(
        &self,
        access_token: &str,
        table: &'static str,
        filters: &[Filter],
        patch: &P,
    ) -> Result<Vec<T>, StoreError> {
        let rows = self
            .backend
            .update(Some(access_token), table, filters, serde_json::to_value(patch)?)
            .await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(StoreError::from))
            .collect()
    }

    /// Returns the number of rows removed.
    pub async fn delete_rows(
        &self,
        access_token: &str,
        table: &'static str,
        filters: &[Filter],
    ) -> Result<usize, StoreError> {
        let rows = self
            .backend
            .delete(Some(access_token), table, filters)
            .await?;
        Ok(rows.len())
    }
}
