//! Client for the hosted backend: auth provider, table store, entity
//! repositories and the identity resolver.
//!
//! The backend itself is external. [`Store`] is the cheaply cloneable
//! handle every repository call goes through; it wraps either the
//! PostgREST/GoTrue [`rest::RestBackend`] or the in-process
//! [`memory::MemoryBackend`].

pub mod backend;
pub mod config;
pub mod error;
pub mod memory;
pub mod models;
pub mod query;
pub mod repositories;
pub mod rest;
pub mod session;
pub mod workload;

use std::sync::Arc;

pub use backend::Store;
pub use error::StoreError;

use config::BackendConfig;

/// Build a store from configuration.
///
/// Without a backend URL the store runs against an empty in-process
/// backend, which is only useful for local development.
pub fn create_store(config: &BackendConfig) -> Result<Store, StoreError> {
    match &config.url {
        Some(url) => {
            let backend = rest::RestBackend::new(url, &config.anon_key, config.timeout)?;
            Ok(Store::new(Arc::new(backend)))
        }
        None => {
            tracing::warn!("SUPABASE_URL not set, using in-memory backend");
            Ok(Store::new(Arc::new(memory::MemoryBackend::new())))
        }
    }
}

/// Check that the backend is reachable.
pub async fn health_check(store: &Store) -> Result<(), StoreError> {
    store.health().await
}
