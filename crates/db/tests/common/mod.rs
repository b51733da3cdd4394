#![allow(dead_code)]

use std::sync::Arc;

use internhub_core::roles::Role;
use internhub_core::session::SessionContext;
use internhub_core::types::EntityId;
use internhub_db::memory::MemoryBackend;
use internhub_db::models::project::ProjectInput;
use internhub_db::models::task::TaskInput;
use internhub_db::session::resolve_session;
use internhub_db::Store;

pub struct Fixture {
    pub backend: Arc<MemoryBackend>,
    pub store: Store,
    pub admin: SessionContext,
    pub intern: SessionContext,
}

pub async fn sign_in(store: &Store, email: &str, password: &str) -> SessionContext {
    let session = store.sign_in_with_password(email, password).await.unwrap();
    resolve_session(store, Some(&session.access_token))
        .await
        .unwrap()
}

/// An admin and one intern, both signed in.
pub async fn fixture() -> Fixture {
    let backend = Arc::new(MemoryBackend::new());
    backend
        .seed_user("admin@example.com", "admin-pass", Role::Admin, Some("Ada Admin"))
        .await;
    backend
        .seed_user("intern@example.com", "intern-pass", Role::Intern, Some("Ivan Intern"))
        .await;
    let store = Store::new(backend.clone());
    let admin = sign_in(&store, "admin@example.com", "admin-pass").await;
    let intern = sign_in(&store, "intern@example.com", "intern-pass").await;
    Fixture {
        backend,
        store,
        admin,
        intern,
    }
}

pub fn project_input(title: &str) -> ProjectInput {
    ProjectInput {
        title: title.to_string(),
        ..Default::default()
    }
}

pub fn task_input(title: &str, project_id: EntityId, assignee_id: EntityId) -> TaskInput {
    TaskInput {
        title: title.to_string(),
        project_id: Some(project_id),
        assignee_id: Some(assignee_id),
        ..Default::default()
    }
}
