mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use internhub_core::roles::Role;
use internhub_db::memory::MemoryBackend;
use internhub_db::session::{resolve_session, SessionError};
use internhub_db::Store;

#[tokio::test]
async fn missing_token_is_not_signed_in() {
    let store = Store::new(Arc::new(MemoryBackend::new()));
    assert_matches!(resolve_session(&store, None).await, Err(SessionError::NotSignedIn));
    assert_matches!(
        resolve_session(&store, Some("   ")).await,
        Err(SessionError::NotSignedIn)
    );
}

#[tokio::test]
async fn signed_out_token_is_not_signed_in() {
    let f = common::fixture().await;
    f.store.sign_out(&f.intern.access_token).await.unwrap();
    assert_matches!(
        resolve_session(&f.store, Some(&f.intern.access_token)).await,
        Err(SessionError::NotSignedIn)
    );
}

#[tokio::test]
async fn user_without_profile_is_profile_missing() {
    let backend = Arc::new(MemoryBackend::new());
    let user_id = backend
        .seed_user_without_profile("ghost@example.com", "ghost-pass")
        .await;
    let store = Store::new(backend);
    let session = store
        .sign_in_with_password("ghost@example.com", "ghost-pass")
        .await
        .unwrap();

    let err = resolve_session(&store, Some(&session.access_token))
        .await
        .unwrap_err();
    assert_matches!(err, SessionError::ProfileMissing { user_id: id } if id == user_id);
    assert!(err.to_string().starts_with("Profile not found"));
}

#[tokio::test]
async fn resolved_session_carries_role() {
    let f = common::fixture().await;
    assert_eq!(f.admin.role, Role::Admin);
    assert!(f.admin.is_admin());
    assert_eq!(f.intern.role, Role::Intern);
    assert_eq!(f.intern.email.as_deref(), Some("intern@example.com"));
}

#[test]
fn session_error_messages_are_distinct() {
    let messages = [
        SessionError::NotSignedIn.to_string(),
        SessionError::ProfileMissing {
            user_id: uuid::Uuid::nil(),
        }
        .to_string(),
        SessionError::PermissionDenied.to_string(),
    ];
    assert_ne!(messages[0], messages[1]);
    assert_ne!(messages[1], messages[2]);
    assert_ne!(messages[0], messages[2]);
}
