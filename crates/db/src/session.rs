//! Identity resolver: access token to [`SessionContext`].

use internhub_core::error::CoreError;
use internhub_core::session::SessionContext;
use internhub_core::types::EntityId;

use crate::backend::{AuthUser, Store};
use crate::error::StoreError;
use crate::repositories::ProfileRepo;

/// Why no session could be resolved. Each kind has its own message.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("You are not signed in")]
    NotSignedIn,

    #[error("Profile not found. Please create a profile for this user.")]
    ProfileMissing { user_id: EntityId },

    #[error("Permission denied. Please check the row-level security policies on profiles.")]
    PermissionDenied,

    #[error("Failed to fetch user profile: {0}")]
    Store(StoreError),
}

impl From<SessionError> for CoreError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotSignedIn => CoreError::Unauthorized(err.to_string()),
            SessionError::ProfileMissing { user_id } => CoreError::NotFound {
                entity: "Profile",
                id: user_id,
            },
            SessionError::PermissionDenied => CoreError::Forbidden(err.to_string()),
            SessionError::Store(inner) => CoreError::from(inner),
        }
    }
}

/// Resolve the principal behind an access token.
pub async fn resolve_session(
    store: &Store,
    access_token: Option<&str>,
) -> Result<SessionContext, SessionError> {
    let token = access_token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(SessionError::NotSignedIn)?;

    let user = match store.get_user(token).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(SessionError::NotSignedIn),
        Err(err) if matches!(err.status(), Some(401 | 403)) => {
            return Err(SessionError::NotSignedIn)
        }
        Err(err) => return Err(SessionError::Store(err)),
    };

    session_for_user(store, token, &user).await
}

/// Look up the profile role for an already-authenticated user.
pub async fn session_for_user(
    store: &Store,
    access_token: &str,
    user: &AuthUser,
) -> Result<SessionContext, SessionError> {
    let role = match ProfileRepo::find_role(store, access_token, user.id).await {
        Ok(Some(role)) => role,
        Ok(None) => return Err(SessionError::ProfileMissing { user_id: user.id }),
        Err(err) if err.is_no_rows() => {
            return Err(SessionError::ProfileMissing { user_id: user.id })
        }
        Err(err) if err.is_permission_denied() => return Err(SessionError::PermissionDenied),
        Err(err) => return Err(SessionError::Store(err)),
    };

    tracing::debug!(user_id = %user.id, role = %role, "Session resolved");
    Ok(SessionContext {
        user_id: user.id,
        email: user.email.clone(),
        role,
        access_token: access_token.to_string(),
    })
}
