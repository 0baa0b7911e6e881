//! Backing store adapter.
//!
//! Every persisted value is a JSON document under a string key. The
//! repositories only ever talk to [`KvStore`], so the medium (process
//! memory, local files, Redis) is chosen once at startup and injected.
//!
//! Writes that depend on a prior read go through
//! [`KvStore::compare_and_swap`] so concurrent writers cannot silently
//! overwrite each other.

mod fallback;
mod file;
mod memory;
mod redis_store;

pub use self::fallback::FallbackStore;
pub use self::file::FileStore;
pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

use async_trait::async_trait;
use fansite_core::error::CoreError;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored value is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Invalid store key '{0}'")]
    InvalidKey(String),
}

impl From<::redis::RedisError> for StoreError {
    fn from(err: ::redis::RedisError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::Persistence(err.to_string())
    }
}

/// Uniform raw get/set over a persistence medium.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Short backend label used in logs and `/health`.
    fn backend_name(&self) -> &'static str;

    /// Raw JSON text stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Unconditionally overwrite `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Write `new` only if the current value equals `expected` (`None`
    /// meaning "key absent"). Returns whether the write happened.
    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: &str,
    ) -> Result<bool, StoreError>;

    /// Remove `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Check the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Read and deserialize the document under `key`.
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Keys are limited to `[A-Za-z0-9_:-]` so every backend can map them
/// safely (file names in particular).
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
