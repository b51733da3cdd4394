use internhub_core::error::CoreError;

/// PostgreSQL `insufficient_privilege`, raised by row policies.
pub const CODE_PERMISSION_DENIED: &str = "42501";
/// PostgreSQL `not_null_violation`.
pub const CODE_NOT_NULL: &str = "23502";
/// PostgreSQL `foreign_key_violation`.
pub const CODE_FOREIGN_KEY: &str = "23503";
/// PostgreSQL `unique_violation`.
pub const CODE_UNIQUE: &str = "23505";
/// PostgreSQL `check_violation`.
pub const CODE_CHECK: &str = "23514";
/// PostgREST "JSON object requested, multiple (or no) rows returned".
pub const CODE_NO_ROWS: &str = "PGRST116";

/// Errors from the backend layer (auth provider and table store).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend rejected the request.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// A response body did not have the expected shape.
    #[error("Unexpected response from backend: {0}")]
    Decode(#[from] serde_json::Error),
}

impl StoreError {
    pub fn api(status: u16, code: Option<&str>, message: impl Into<String>) -> Self {
        StoreError::Api {
            status,
            code: code.map(str::to_string),
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            StoreError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Api { status, .. } => Some(*status),
            StoreError::Request(err) => err.status().map(|s| s.as_u16()),
            StoreError::Decode(_) => None,
        }
    }

    /// Row-policy or privilege rejection.
    pub fn is_permission_denied(&self) -> bool {
        if self.code() == Some(CODE_PERMISSION_DENIED) {
            return true;
        }
        match self {
            StoreError::Api { status, message, .. } => {
                let lower = message.to_lowercase();
                *status == 401
                    || *status == 403
                    || lower.contains("permission denied")
                    || lower.contains("row-level security")
            }
            _ => false,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        self.code() == Some(CODE_UNIQUE)
    }

    pub fn is_no_rows(&self) -> bool {
        match self {
            StoreError::Api { code, message, .. } => {
                code.as_deref() == Some(CODE_NO_ROWS) || message.contains("No rows")
            }
            _ => false,
        }
    }

    /// Missing or dangling required reference, or a failed check.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self.code(),
            Some(CODE_NOT_NULL) | Some(CODE_FOREIGN_KEY) | Some(CODE_CHECK)
        )
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        if err.is_permission_denied() {
            CoreError::Forbidden(message)
        } else if err.is_unique_violation() {
            CoreError::Conflict(message)
        } else if err.is_constraint_violation() {
            CoreError::Validation(message)
        } else {
            CoreError::Internal(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn policy_code_is_permission_denied() {
        let err = StoreError::api(400, Some("42501"), "new row violates row-level security policy");
        assert!(err.is_permission_denied());
        assert_matches!(CoreError::from(err), CoreError::Forbidden(_));
    }

    #[test]
    fn forbidden_status_without_code_is_permission_denied() {
        let err = StoreError::api(403, None, "forbidden");
        assert!(err.is_permission_denied());
    }

    #[test]
    fn not_null_maps_to_validation() {
        let err = StoreError::api(
            400,
            Some("23502"),
            "null value in column \"assignee_id\" violates not-null constraint",
        );
        assert_matches!(CoreError::from(err), CoreError::Validation(msg) if msg.contains("assignee_id"));
    }

    #[test]
    fn unique_maps_to_conflict() {
        let err = StoreError::api(409, Some("23505"), "duplicate key");
        assert!(err.is_unique_violation());
        assert_matches!(CoreError::from(err), CoreError::Conflict(_));
    }

    #[test]
    fn no_rows_detected_by_code_or_message() {
        assert!(StoreError::api(406, Some("PGRST116"), "x").is_no_rows());
        assert!(StoreError::api(406, None, "No rows found").is_no_rows());
        assert!(!StoreError::api(500, None, "boom").is_no_rows());
    }
}
