//! In-process backend with the same row policies and constraints as the
//! hosted store.
//!
//! Rows are JSON objects kept per table. Reads, updates and deletes only
//! see rows the caller's policy admits; inserts that fail a policy check
//! are rejected with `42501`. Not-null, foreign-key, check and primary-key
//! constraints raise the PostgreSQL codes the REST backend would surface,
//! and deleting a project cascades to its tasks and their comments.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;

use internhub_core::roles::Role;
use internhub_core::types::EntityId;

use crate::backend::{AuthProvider, AuthSession, AuthUser, SignUpOutcome, TableStore};
use crate::error::{
    StoreError, CODE_CHECK, CODE_FOREIGN_KEY, CODE_NOT_NULL, CODE_PERMISSION_DENIED, CODE_UNIQUE,
};
use crate::models::{comment, profile, project, task};
use crate::query::{Embed, Filter, Select};

type Row = Map<String, Value>;

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

struct TableSchema {
    name: &'static str,
    /// Whether `id` is generated when absent (profiles take the auth id).
    generated_id: bool,
    not_null: &'static [&'static str],
    defaults: &'static [(&'static str, &'static str)],
    allowed_values: &'static [(&'static str, &'static [&'static str])],
    foreign_keys: &'static [(&'static str, &'static str)],
}

const PROJECT_STATUSES: &[&str] = &["planned", "in-progress", "completed"];
const TASK_STATUSES: &[&str] = &["todo", "in-progress", "completed"];
const ROLES: &[&str] = &["admin", "intern"];

const SCHEMAS: &[TableSchema] = &[
    TableSchema {
        name: profile::TABLE,
        generated_id: false,
        not_null: &["id", "role"],
        defaults: &[("role", "intern")],
        allowed_values: &[("role", ROLES)],
        foreign_keys: &[],
    },
    TableSchema {
        name: project::TABLE,
        generated_id: true,
        not_null: &["id", "title", "status"],
        defaults: &[("status", "planned")],
        allowed_values: &[("status", PROJECT_STATUSES)],
        foreign_keys: &[("created_by", profile::TABLE)],
    },
    TableSchema {
        name: task::TABLE,
        generated_id: true,
        not_null: &["id", "title", "project_id", "assignee_id", "status"],
        defaults: &[("status", "todo")],
        allowed_values: &[("status", TASK_STATUSES)],
        foreign_keys: &[
            ("project_id", project::TABLE),
            ("assignee_id", profile::TABLE),
            ("created_by", profile::TABLE),
        ],
    },
    TableSchema {
        name: comment::TABLE,
        generated_id: true,
        not_null: &["id", "task_id", "user_id", "body"],
        defaults: &[],
        allowed_values: &[],
        foreign_keys: &[("task_id", task::TABLE), ("user_id", profile::TABLE)],
    },
];

fn schema(table: &str) -> Result<&'static TableSchema, StoreError> {
    SCHEMAS.iter().find(|s| s.name == table).ok_or_else(|| {
        StoreError::api(
            404,
            Some("42P01"),
            format!("relation \"public.{table}\" does not exist"),
        )
    })
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

struct UserRecord {
    user: AuthUser,
    password: String,
    confirmed: bool,
}

#[derive(Clone, Copy)]
struct Principal {
    user_id: EntityId,
    is_admin: bool,
}

#[derive(Default)]
struct Inner {
    users: Vec<UserRecord>,
    sessions: HashMap<String, EntityId>,
    tables: HashMap<&'static str, Vec<Row>>,
    last_timestamp: Option<DateTime<Utc>>,
}

pub struct MemoryBackend {
    inner: RwLock<Inner>,
    email_confirmation: bool,
    profile_trigger: bool,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            email_confirmation: false,
            profile_trigger: false,
        }
    }

    /// Signups return no session until [`MemoryBackend::confirm_email`].
    pub fn with_email_confirmation(mut self, enabled: bool) -> Self {
        self.email_confirmation = enabled;
        self
    }

    /// Create a profile for every new auth user, taking the role from the
    /// signup metadata.
    pub fn with_profile_trigger(mut self, enabled: bool) -> Self {
        self.profile_trigger = enabled;
        self
    }

    // ---- seeding and inspection ----

    /// Create a confirmed user together with a profile row.
    pub async fn seed_user(
        &self,
        email: &str,
        password: &str,
        role: Role,
        full_name: Option<&str>,
    ) -> EntityId {
        let mut inner = self.inner.write().await;
        let id = inner.create_user(email, password, json!({ "role": role.as_str() }), true);
        let created_at = inner.next_timestamp();
        let row = json!({
            "id": id.to_string(),
            "full_name": full_name,
            "email": email,
            "role": role.as_str(),
            "created_at": created_at,
        });
        inner.rows_mut(profile::TABLE).push(into_row(row));
        id
    }

    /// Create a confirmed user with no profile row.
    pub async fn seed_user_without_profile(&self, email: &str, password: &str) -> EntityId {
        let mut inner = self.inner.write().await;
        inner.create_user(email, password, json!({}), true)
    }

    pub async fn confirm_email(&self, email: &str) {
        let mut inner = self.inner.write().await;
        if let Some(record) = inner.find_user_mut(email) {
            record.confirmed = true;
        }
    }

    /// Every row of a table, bypassing row policies.
    pub async fn rows(&self, table: &str) -> Vec<Value> {
        let inner = self.inner.read().await;
        inner
            .tables
            .get(table)
            .map(|rows| rows.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    pub async fn active_sessions(&self) -> usize {
        self.inner.read().await.sessions.len()
    }

    /// Registered auth users, with or without a profile.
    pub async fn user_count(&self) -> usize {
        self.inner.read().await.users.len()
    }
}

impl Inner {
    /// RFC 3339 with microseconds, strictly increasing across calls so
    /// `created_at` ordering is total.
    fn next_timestamp(&mut self) -> String {
        let mut now = Utc::now();
        if let Some(last) = self.last_timestamp {
            if now <= last {
                now = last + chrono::Duration::microseconds(1);
            }
        }
        self.last_timestamp = Some(now);
        now.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn find_user_mut(&mut self, email: &str) -> Option<&mut UserRecord> {
        let email = email.trim().to_lowercase();
        self.users
            .iter_mut()
            .find(|r| r.user.email.as_deref() == Some(email.as_str()))
    }

    fn create_user(&mut self, email: &str, password: &str, metadata: Value, confirmed: bool) -> EntityId {
        let id = EntityId::new_v4();
        self.users.push(UserRecord {
            user: AuthUser {
                id,
                email: Some(email.trim().to_lowercase()),
                user_metadata: metadata,
            },
            password: password.to_string(),
            confirmed,
        });
        id
    }

    fn issue_session(&mut self, user: &AuthUser) -> AuthSession {
        let token = EntityId::new_v4().simple().to_string();
        self.sessions.insert(token.clone(), user.id);
        AuthSession {
            access_token: token,
            refresh_token: Some(EntityId::new_v4().simple().to_string()),
            expires_in: Some(3600),
            user: user.clone(),
        }
    }

    fn rows(&self, table: &str) -> &[Row] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    fn rows_mut(&mut self, table: &'static str) -> &mut Vec<Row> {
        self.tables.entry(table).or_default()
    }

    fn find_by_id(&self, table: &str, id: &Value) -> Option<&Row> {
        self.rows(table).iter().find(|r| r.get("id") == Some(id))
    }

    /// Resolve the caller. An unknown token is rejected the way the data
    /// API rejects an expired JWT.
    fn principal(&self, access_token: Option<&str>) -> Result<Option<Principal>, StoreError> {
        let Some(token) = access_token else {
            return Ok(None);
        };
        let user_id = self
            .sessions
            .get(token)
            .copied()
            .ok_or_else(|| StoreError::api(401, Some("PGRST301"), "JWT expired"))?;
        let is_admin = self
            .find_by_id(profile::TABLE, &id_value(user_id))
            .and_then(|p| p.get("role"))
            .and_then(Value::as_str)
            == Some(Role::Admin.as_str());
        Ok(Some(Principal { user_id, is_admin }))
    }

    // ---- row policies ----

    fn can_read(&self, table: &str, row: &Row, who: Option<Principal>) -> bool {
        let Some(who) = who else {
            return false;
        };
        match table {
            t if t == profile::TABLE => {
                who.is_admin
                    || is_user(row, "id", who.user_id)
                    || row.get("role").and_then(Value::as_str) == Some(Role::Admin.as_str())
            }
            t if t == project::TABLE => true,
            t if t == task::TABLE => who.is_admin || is_user(row, "assignee_id", who.user_id),
            t if t == comment::TABLE => row
                .get("task_id")
                .and_then(|id| self.find_by_id(task::TABLE, id))
                .is_some_and(|task| self.can_read(task::TABLE, task, Some(who))),
            _ => false,
        }
    }

    fn can_insert(&self, table: &str, row: &Row, who: Option<Principal>) -> bool {
        let Some(who) = who else {
            return false;
        };
        match table {
            t if t == profile::TABLE => who.is_admin || is_user(row, "id", who.user_id),
            t if t == project::TABLE || t == task::TABLE => who.is_admin,
            t if t == comment::TABLE => {
                is_user(row, "user_id", who.user_id)
                    && row
                        .get("task_id")
                        .and_then(|id| self.find_by_id(task::TABLE, id))
                        .is_some_and(|task| self.can_read(task::TABLE, task, Some(who)))
            }
            _ => false,
        }
    }

    fn can_update(&self, table: &str, row: &Row, who: Option<Principal>) -> bool {
        let Some(who) = who else {
            return false;
        };
        match table {
            t if t == profile::TABLE => who.is_admin || is_user(row, "id", who.user_id),
            t if t == project::TABLE => who.is_admin,
            t if t == task::TABLE => who.is_admin || is_user(row, "assignee_id", who.user_id),
            _ => false,
        }
    }

    fn can_delete(&self, table: &str, who: Option<Principal>) -> bool {
        let Some(who) = who else {
            return false;
        };
        (table == project::TABLE || table == task::TABLE) && who.is_admin
    }

    // ---- constraints ----

    fn check_constraints(&self, schema: &TableSchema, row: &Row) -> Result<(), StoreError> {
        let table = schema.name;
        for column in schema.not_null {
            if row.get(*column).is_none_or(Value::is_null) {
                return Err(StoreError::api(
                    400,
                    Some(CODE_NOT_NULL),
                    format!(
                        "null value in column \"{column}\" of relation \"{table}\" violates not-null constraint"
                    ),
                ));
            }
        }
        for (column, allowed) in schema.allowed_values {
            if let Some(value) = row.get(*column).and_then(Value::as_str) {
                if !allowed.contains(&value) {
                    return Err(check_violation(table, &format!("{table}_{column}_check")));
                }
            }
        }
        for (column, target) in schema.foreign_keys {
            let Some(value) = row.get(*column).filter(|v| !v.is_null()) else {
                continue;
            };
            if self.find_by_id(target, value).is_none() {
                return Err(StoreError::api(
                    409,
                    Some(CODE_FOREIGN_KEY),
                    format!(
                        "insert or update on table \"{table}\" violates foreign key constraint \"{table}_{column}_fkey\""
                    ),
                ));
            }
        }
        if table == task::TABLE {
            let assignee_role = row
                .get("assignee_id")
                .and_then(|id| self.find_by_id(profile::TABLE, id))
                .and_then(|p| p.get("role"))
                .and_then(Value::as_str);
            if assignee_role != Some(Role::Intern.as_str()) {
                return Err(check_violation(table, "tasks_assignee_is_intern"));
            }
        }
        Ok(())
    }

    // ---- reads ----

    fn project_row(&self, row: &Row, columns: &[&str], embeds: &[Embed], who: Option<Principal>) -> Row {
        let mut out = project_columns(row, columns);
        for embed in embeds {
            let related = row
                .get(embed.foreign_key)
                .filter(|v| !v.is_null())
                .and_then(|id| self.find_by_id(embed.table, id))
                .filter(|r| self.can_read(embed.table, r, who))
                .map(|r| Value::Object(project_columns(r, embed.columns)))
                .unwrap_or(Value::Null);
            out.insert(embed.table.to_string(), related);
        }
        out
    }

    fn select(&self, who: Option<Principal>, query: &Select) -> Result<Vec<Value>, StoreError> {
        schema(query.table)?;
        let mut rows: Vec<&Row> = self
            .rows(query.table)
            .iter()
            .filter(|r| self.can_read(query.table, r, who))
            .filter(|r| query.filters.iter().all(|f| f.matches(r)))
            .collect();

        rows.sort_by(|a, b| {
            query
                .order
                .iter()
                .map(|o| {
                    let ord = compare_nullable(a.get(o.column), b.get(o.column));
                    if o.ascending {
                        ord
                    } else {
                        ord.reverse()
                    }
                })
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });

        Ok(rows
            .into_iter()
            .map(|r| Value::Object(self.project_row(r, query.columns, &query.embeds, who)))
            .collect())
    }

    fn matching_ids(
        &self,
        table: &str,
        filters: &[Filter],
        admit: impl Fn(&Row) -> bool,
    ) -> Vec<Value> {
        self.rows(table)
            .iter()
            .filter(|r| filters.iter().all(|f| f.matches(r)))
            .filter(|r| admit(r))
            .filter_map(|r| r.get("id").cloned())
            .collect()
    }

    /// Remove rows whose `column` is in `ids`, returning the removed rows.
    fn remove_where(&mut self, table: &'static str, column: &str, ids: &[Value]) -> Vec<Row> {
        let rows = self.rows_mut(table);
        let (removed, kept): (Vec<Row>, Vec<Row>) = rows
            .drain(..)
            .partition(|r| r.get(column).is_some_and(|v| ids.contains(v)));
        *rows = kept;
        removed
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn id_value(id: EntityId) -> Value {
    Value::String(id.to_string())
}

fn is_user(row: &Row, column: &str, user_id: EntityId) -> bool {
    row.get(column).and_then(Value::as_str) == Some(user_id.to_string().as_str())
}

fn into_row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        _ => Row::new(),
    }
}

fn project_columns(row: &Row, columns: &[&str]) -> Row {
    if columns.is_empty() || columns.contains(&"*") {
        return row.clone();
    }
    columns
        .iter()
        .filter_map(|c| row.get(*c).map(|v| (c.to_string(), v.clone())))
        .collect()
}

fn check_violation(table: &str, constraint: &str) -> StoreError {
    StoreError::api(
        400,
        Some(CODE_CHECK),
        format!("new row for relation \"{table}\" violates check constraint \"{constraint}\""),
    )
}

fn policy_violation(table: &str) -> StoreError {
    StoreError::api(
        403,
        Some(CODE_PERMISSION_DENIED),
        format!("new row violates row-level security policy for table \"{table}\""),
    )
}

/// Nulls sort after every value, so ascending puts them last and
/// descending puts them first.
fn compare_nullable(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => compare_values(a, b),
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Trait implementations
// ---------------------------------------------------------------------------

#[async_trait]
impl AuthProvider for MemoryBackend {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, StoreError> {
        let mut inner = self.inner.write().await;
        let (user, confirmed) = match inner.find_user_mut(email) {
            Some(record) if record.password == password => (record.user.clone(), record.confirmed),
            _ => {
                return Err(StoreError::api(
                    400,
                    Some("invalid_credentials"),
                    "Invalid login credentials",
                ))
            }
        };
        if !confirmed {
            return Err(StoreError::api(
                400,
                Some("email_not_confirmed"),
                "Email not confirmed",
            ));
        }
        Ok(inner.issue_session(&user))
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<SignUpOutcome, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.find_user_mut(email).is_some() {
            return Err(StoreError::api(
                422,
                Some("user_already_exists"),
                "User already registered",
            ));
        }
        if password.chars().count() < 6 {
            return Err(StoreError::api(
                422,
                Some("weak_password"),
                "Password should be at least 6 characters.",
            ));
        }

        let role = metadata
            .get("role")
            .and_then(Value::as_str)
            .filter(|r| ROLES.contains(r))
            .unwrap_or(Role::Intern.as_str())
            .to_string();
        let id = inner.create_user(email, password, metadata, !self.email_confirmation);

        if self.profile_trigger {
            let created_at = inner.next_timestamp();
            inner.rows_mut(profile::TABLE).push(into_row(json!({
                "id": id.to_string(),
                "full_name": null,
                "email": email.trim().to_lowercase(),
                "role": role,
                "created_at": created_at,
            })));
        }

        let user = inner
            .users
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.user.clone());
        let session = match (&user, self.email_confirmation) {
            (Some(user), false) => Some(inner.issue_session(user)),
            _ => None,
        };
        Ok(SignUpOutcome { user, session })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), StoreError> {
        self.inner.write().await.sessions.remove(access_token);
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, StoreError> {
        let inner = self.inner.read().await;
        let Some(user_id) = inner.sessions.get(access_token) else {
            return Ok(None);
        };
        Ok(inner
            .users
            .iter()
            .find(|r| r.user.id == *user_id)
            .map(|r| r.user.clone()))
    }
}

#[async_trait]
impl TableStore for MemoryBackend {
    async fn select(
        &self,
        access_token: Option<&str>,
        query: &Select,
    ) -> Result<Vec<Value>, StoreError> {
        let inner = self.inner.read().await;
        let who = inner.principal(access_token)?;
        inner.select(who, query)
    }

    async fn insert(
        &self,
        access_token: Option<&str>,
        table: &'static str,
        row: Value,
    ) -> Result<Value, StoreError> {
        let schema = schema(table)?;
        let mut inner = self.inner.write().await;
        let who = inner.principal(access_token)?;

        let mut row = into_row(row);
        if schema.generated_id && !row.contains_key("id") {
            row.insert("id".into(), id_value(EntityId::new_v4()));
        }
        for (column, default) in schema.defaults {
            row.entry(column.to_string())
                .or_insert_with(|| Value::String(default.to_string()));
        }
        if !row.contains_key("created_at") {
            let created_at = inner.next_timestamp();
            row.insert("created_at".into(), Value::String(created_at));
        }

        if !inner.can_insert(table, &row, who) {
            return Err(policy_violation(table));
        }
        inner.check_constraints(schema, &row)?;
        if let Some(id) = row.get("id") {
            if inner.find_by_id(table, id).is_some() {
                return Err(StoreError::api(
                    409,
                    Some(CODE_UNIQUE),
                    format!("duplicate key value violates unique constraint \"{table}_pkey\""),
                ));
            }
        }

        inner.rows_mut(table).push(row.clone());
        Ok(Value::Object(row))
    }

    async fn update(
        &self,
        access_token: Option<&str>,
        table: &'static str,
        filters: &[Filter],
        patch: Value,
    ) -> Result<Vec<Value>, StoreError> {
        let schema = schema(table)?;
        let mut inner = self.inner.write().await;
        let who = inner.principal(access_token)?;
        let patch = into_row(patch);

        let ids = inner.matching_ids(table, filters, |r| inner.can_update(table, r, who));
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        // Assignees may only move a task's status.
        if table == task::TABLE
            && !who.is_some_and(|w| w.is_admin)
            && patch.keys().any(|k| k != "status")
        {
            return Err(StoreError::api(
                403,
                Some(CODE_PERMISSION_DENIED),
                format!("permission denied for table {table}"),
            ));
        }

        let mut updated = Vec::with_capacity(ids.len());
        for id in &ids {
            let Some(current) = inner.find_by_id(table, id) else {
                continue;
            };
            let mut next = current.clone();
            for (key, value) in &patch {
                next.insert(key.clone(), value.clone());
            }
            inner.check_constraints(schema, &next)?;
            updated.push(next);
        }

        let rows = inner.rows_mut(table);
        for next in &updated {
            if let Some(slot) = rows.iter_mut().find(|r| r.get("id") == next.get("id")) {
                *slot = next.clone();
            }
        }
        Ok(updated.into_iter().map(Value::Object).collect())
    }

    async fn delete(
        &self,
        access_token: Option<&str>,
        table: &'static str,
        filters: &[Filter],
    ) -> Result<Vec<Value>, StoreError> {
        schema(table)?;
        let mut inner = self.inner.write().await;
        let who = inner.principal(access_token)?;
        if !inner.can_delete(table, who) {
            return Ok(Vec::new());
        }

        let ids = inner.matching_ids(table, filters, |_| true);
        let removed = inner.remove_where(table, "id", &ids);

        let task_ids: Vec<Value> = if table == project::TABLE {
            inner
                .remove_where(task::TABLE, "project_id", &ids)
                .into_iter()
                .filter_map(|r| r.get("id").cloned())
                .collect()
        } else if table == task::TABLE {
            ids.clone()
        } else {
            Vec::new()
        };
        if !task_ids.is_empty() {
            inner.remove_where(comment::TABLE, "task_id", &task_ids);
        }

        tracing::debug!(table, removed = removed.len(), "Memory backend delete");
        Ok(removed.into_iter().map(Value::Object).collect())
    }

    async fn health(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
