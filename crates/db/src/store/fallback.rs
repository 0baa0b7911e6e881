use std::sync::Arc;

use async_trait::async_trait;

use super::{KvStore, MemoryStore, StoreError};

/// Wraps a durable store with an in-memory mirror.
///
/// Successful reads and writes against the primary are mirrored into
/// memory. When the primary errors, the failure is logged and the
/// operation is served from the mirror instead, so the site keeps working
/// on its last known state while durability is lost until the primary
/// recovers.
pub struct FallbackStore {
    primary: Arc<dyn KvStore>,
    mirror: MemoryStore,
}

impl FallbackStore {
    pub fn new(primary: Arc<dyn KvStore>) -> Self {
        Self {
            primary,
            mirror: MemoryStore::new(),
        }
    }

    async fn remember(&self, key: &str, value: Option<&str>) {
        // Mirror writes never fail.
        let _ = match value {
            Some(v) => self.mirror.set(key, v).await,
            None => self.mirror.delete(key).await,
        };
    }
}

#[async_trait]
impl KvStore for FallbackStore {
    fn backend_name(&self) -> &'static str {
        self.primary.backend_name()
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.primary.get(key).await {
            Ok(value) => {
                self.remember(key, value.as_deref()).await;
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "Primary store read failed, serving from memory");
                self.mirror.get(key).await
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Err(err) = self.primary.set(key, value).await {
            tracing::warn!(key, error = %err, "Primary store write failed, keeping value in memory only");
        }
        self.mirror.set(key, value).await
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: &str,
    ) -> Result<bool, StoreError> {
        match self.primary.compare_and_swap(key, expected, new).await {
            Ok(true) => {
                self.remember(key, Some(new)).await;
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(err) => {
                tracing::warn!(key, error = %err, "Primary store write failed, keeping value in memory only");
                self.mirror.compare_and_swap(key, expected, new).await
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        if let Err(err) = self.primary.delete(key).await {
            tracing::warn!(key, error = %err, "Primary store delete failed, deleting from memory only");
        }
        self.mirror.delete(key).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.primary.ping().await
    }
}
