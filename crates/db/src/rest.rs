//! HTTP backend speaking PostgREST (`/rest/v1`) and GoTrue (`/auth/v1`).
//!
//! Every request carries the public `apikey` header. Data requests carry
//! `Authorization: Bearer <access token>` so the store evaluates its row
//! policies for the signed-in principal; anonymous requests send the anon
//! key as the bearer instead.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::backend::{AuthProvider, AuthSession, AuthUser, SignUpOutcome, TableStore};
use crate::error::StoreError;
use crate::query::{Filter, Select};

pub struct RestBackend {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl RestBackend {
    /// Create a backend client for a project.
    ///
    /// * `base_url` - Project URL without a trailing slash.
    pub fn new(base_url: &str, anon_key: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, anon_key))
    }

    /// Create a backend reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str, anon_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn request(
        &self,
        method: reqwest::Method,
        url: String,
        access_token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let bearer = access_token.unwrap_or(&self.anon_key);
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    fn filter_pairs(filters: &[Filter]) -> Vec<(String, String)> {
        filters.iter().map(Filter::to_query_pair).collect()
    }

    // ---- private helpers ----

    /// Map a non-2xx response to [`StoreError::Api`], pulling the code and
    /// message out of either a PostgREST or a GoTrue error body.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(parse_error_body(status.as_u16(), &body))
    }

    async fn parse_json(response: reqwest::Response) -> Result<Value, StoreError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn parse_rows(response: reqwest::Response) -> Result<Vec<Value>, StoreError> {
        match Self::parse_json(response).await? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            other => Ok(vec![other]),
        }
    }
}

/// Build an API error from a response body.
///
/// PostgREST sends `{code, message, details, hint}`; GoTrue sends either
/// `{error, error_description}` or `{code, error_code, msg}` where `code`
/// is the numeric HTTP status.
pub(crate) fn parse_error_body(status: u16, body: &str) -> StoreError {
    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);

    let message = ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|key| parsed.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("Backend returned HTTP {status}")
            } else {
                body.to_string()
            }
        });

    let code = parsed
        .get("code")
        .and_then(Value::as_str)
        .or_else(|| parsed.get("error_code").and_then(Value::as_str))
        .map(str::to_string);

    StoreError::Api {
        status,
        code,
        message,
    }
}

/// A GoTrue signup response is a full session when confirmation is off, or
/// the bare user object while confirmation is pending.
fn parse_sign_up(body: Value) -> Result<SignUpOutcome, StoreError> {
    if body.get("access_token").is_some() {
        let session: AuthSession = serde_json::from_value(body)?;
        return Ok(SignUpOutcome {
            user: Some(session.user.clone()),
            session: Some(session),
        });
    }
    if let Some(user) = body.get("user").filter(|u| !u.is_null()) {
        return Ok(SignUpOutcome {
            user: Some(serde_json::from_value(user.clone())?),
            session: None,
        });
    }
    if body.get("id").is_some() {
        return Ok(SignUpOutcome {
            user: Some(serde_json::from_value(body)?),
            session: None,
        });
    }
    Ok(SignUpOutcome::default())
}

#[async_trait]
impl AuthProvider for RestBackend {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, StoreError> {
        let response = self
            .request(
                reqwest::Method::POST,
                self.auth_url("token?grant_type=password"),
                None,
            )
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body = Self::parse_json(response).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<SignUpOutcome, StoreError> {
        let response = self
            .request(reqwest::Method::POST, self.auth_url("signup"), None)
            .json(&json!({ "email": email, "password": password, "data": metadata }))
            .send()
            .await?;
        parse_sign_up(Self::parse_json(response).await?)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::POST, self.auth_url("logout"), Some(access_token))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, StoreError> {
        let response = self
            .request(reqwest::Method::GET, self.auth_url("user"), Some(access_token))
            .send()
            .await?;
        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            return Ok(None);
        }
        let body = Self::parse_json(response).await?;
        Ok(Some(serde_json::from_value(body)?))
    }
}

#[async_trait]
impl TableStore for RestBackend {
    async fn select(
        &self,
        access_token: Option<&str>,
        query: &Select,
    ) -> Result<Vec<Value>, StoreError> {
        let response = self
            .request(reqwest::Method::GET, self.rest_url(query.table), access_token)
            .query(&query.to_query_pairs())
            .send()
            .await?;
        Self::parse_rows(response).await
    }

    async fn insert(
        &self,
        access_token: Option<&str>,
        table: &'static str,
        row: Value,
    ) -> Result<Value, StoreError> {
        let response = self
            .request(reqwest::Method::POST, self.rest_url(table), access_token)
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;
        Self::parse_rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::api(200, None, format!("Insert into {table} returned no row")))
    }

    async fn update(
        &self,
        access_token: Option<&str>,
        table: &'static str,
        filters: &[Filter],
        patch: Value,
    ) -> Result<Vec<Value>, StoreError> {
        let response = self
            .request(reqwest::Method::PATCH, self.rest_url(table), access_token)
            .header("Prefer", "return=representation")
            .query(&Self::filter_pairs(filters))
            .json(&patch)
            .send()
            .await?;
        Self::parse_rows(response).await
    }

    async fn delete(
        &self,
        access_token: Option<&str>,
        table: &'static str,
        filters: &[Filter],
    ) -> Result<Vec<Value>, StoreError> {
        let response = self
            .request(reqwest::Method::DELETE, self.rest_url(table), access_token)
            .header("Prefer", "return=representation")
            .query(&Self::filter_pairs(filters))
            .send()
            .await?;
        Self::parse_rows(response).await
    }

    async fn health(&self) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::GET, self.auth_url("health"), None)
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
