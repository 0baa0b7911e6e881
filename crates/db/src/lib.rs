//! Persistence for the fan site: the pluggable key-value store, the record
//! models stored in it, and the repositories over those records.

pub mod models;
pub mod repositories;
pub mod store;

use std::path::PathBuf;
use std::sync::Arc;

use store::{FallbackStore, FileStore, KvStore, MemoryStore, RedisStore, StoreError};

/// Shared handle to the configured backing store.
pub type Store = Arc<dyn KvStore>;

/// Which medium backs the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process memory; contents are lost on restart.
    Memory,
    /// One JSON file per key inside the given directory.
    File(PathBuf),
    /// Redis at the given connection URL.
    Redis(String),
}

/// Build the store for `backend`.
///
/// With `fallback` enabled, a durable backend that cannot be reached at
/// startup degrades to an in-memory store with a warning, and a reachable
/// one is wrapped in [`FallbackStore`] so later outages do the same.
/// Without it, connection errors are returned.
pub async fn create_store(backend: &StoreBackend, fallback: bool) -> Result<Store, StoreError> {
    let primary: Result<Store, StoreError> = match backend {
        StoreBackend::Memory => return Ok(Arc::new(MemoryStore::new())),
        StoreBackend::File(dir) => FileStore::open(dir).await.map(|s| Arc::new(s) as Store),
        StoreBackend::Redis(url) => RedisStore::connect(url).await.map(|s| Arc::new(s) as Store),
    };

    match (primary, fallback) {
        (Ok(store), true) => Ok(Arc::new(FallbackStore::new(store))),
        (Ok(store), false) => Ok(store),
        (Err(err), true) => {
            tracing::warn!(
                error = %err,
                "Store backend unavailable, falling back to in-memory storage; data will not persist"
            );
            Ok(Arc::new(MemoryStore::new()))
        }
        (Err(err), false) => Err(err),
    }
}

/// Verify the store is reachable.
pub async fn health_check(store: &dyn KvStore) -> Result<(), StoreError> {
    store.ping().await
}
