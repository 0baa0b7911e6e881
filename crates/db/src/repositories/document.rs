//! Shared read-modify-write machinery for JSON documents.
//!
//! Each collection (and the profile singleton) lives in one document.
//! [`mutate`] loads it, applies a change, and commits with
//! compare-and-swap against the exact text that was read. When another
//! writer got there first the change is re-applied to the fresh document.

use fansite_core::error::CoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use validator::Validate;

use crate::store::{KvStore, StoreError};

/// Attempts before a contended mutation gives up with `Conflict`.
pub const MAX_CAS_ATTEMPTS: usize = 5;

/// A record kept in a collection document.
pub trait Record: Serialize + DeserializeOwned + Validate + Clone + Send + Sync {
    /// Entity label used in `NotFound` errors.
    const ENTITY: &'static str;
    /// Store key holding the collection.
    const KEY: &'static str;

    fn id(&self) -> &str;
    fn is_active(&self) -> bool;
}

/// Decode a raw document, treating absence as `T::default()`.
pub(crate) fn decode<T: DeserializeOwned + Default>(raw: Option<&str>) -> Result<T, CoreError> {
    match raw {
        Some(text) => Ok(serde_json::from_str(text).map_err(StoreError::from)?),
        None => Ok(T::default()),
    }
}

/// Load the document under `key`, or its default when absent.
pub(crate) async fn load<T: DeserializeOwned + Default>(
    store: &dyn KvStore,
    key: &str,
) -> Result<T, CoreError> {
    let raw = store.get(key).await?;
    decode(raw.as_deref())
}

/// Apply `change` to the document under `key` and commit it atomically.
///
/// `change` may run more than once, so it must only touch the document it
/// is given. Errors it returns abort without writing. A change that leaves
/// the serialized document identical skips the write.
pub(crate) async fn mutate<T, R, F>(store: &dyn KvStore, key: &str, mut change: F) -> Result<R, CoreError>
where
    T: Serialize + DeserializeOwned + Default,
    F: FnMut(&mut T) -> Result<R, CoreError>,
{
    for attempt in 1..=MAX_CAS_ATTEMPTS {
        let raw = store.get(key).await?;
        let mut doc: T = decode(raw.as_deref())?;
        let out = change(&mut doc)?;

        let encoded = serde_json::to_string(&doc).map_err(StoreError::from)?;
        if raw.as_deref() == Some(encoded.as_str()) {
            return Ok(out);
        }
        if store.compare_and_swap(key, raw.as_deref(), &encoded).await? {
            return Ok(out);
        }
        tracing::debug!(key, attempt, "Concurrent write detected, retrying");
    }

    tracing::warn!(key, "Giving up after repeated concurrent writes");
    Err(CoreError::Conflict(format!(
        "'{key}' was modified concurrently; please retry"
    )))
}

/// Copy of `patch` with blank strings in `optional` fields turned into
/// `null`, which unsets them.
pub(crate) fn blank_to_null(patch: &Map<String, Value>, optional: &[&str]) -> Map<String, Value> {
    patch
        .iter()
        .map(|(field, value)| {
            let blank = matches!(value, Value::String(s) if s.trim().is_empty());
            if blank && optional.contains(&field.as_str()) {
                (field.clone(), Value::Null)
            } else {
                (field.clone(), value.clone())
            }
        })
        .collect()
}

/// Shallow-merge `patch` onto `current` and validate the result.
///
/// Top-level fields in `patch` replace those of `current`; fields named in
/// `immutable` are ignored. Type mismatches and rule violations surface as
/// `Validation` errors.
pub(crate) fn apply_patch<T>(
    current: &T,
    patch: &Map<String, Value>,
    immutable: &[&str],
) -> Result<T, CoreError>
where
    T: Serialize + DeserializeOwned + Validate,
{
    let mut merged = match serde_json::to_value(current) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return Err(CoreError::Internal("record is not a JSON object".into())),
        Err(err) => return Err(CoreError::Internal(err.to_string())),
    };
    for (field, value) in patch {
        if !immutable.contains(&field.as_str()) {
            merged.insert(field.clone(), value.clone());
        }
    }

    let updated: T = serde_json::from_value(Value::Object(merged))
        .map_err(|e| CoreError::Validation(e.to_string()))?;
    updated.validate()?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::store::MemoryStore;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
    struct Counter {
        id: String,
        #[validate(range(max = 10))]
        n: u32,
    }

    #[tokio::test]
    async fn mutate_creates_missing_document() {
        let store = MemoryStore::new();
        mutate(&store, "nums", |v: &mut Vec<u32>| {
            v.push(7);
            Ok(())
        })
        .await
        .unwrap();
        assert_eq!(store.get("nums").await.unwrap().as_deref(), Some("[7]"));
    }

    #[tokio::test]
    async fn failed_change_writes_nothing() {
        let store = MemoryStore::new();
        let result: Result<(), _> = mutate(&store, "nums", |v: &mut Vec<u32>| {
            v.push(1);
            Err(CoreError::Validation("nope".into()))
        })
        .await;
        assert_matches!(result, Err(CoreError::Validation(_)));
        assert_eq!(store.get("nums").await.unwrap(), None);
    }

    /// Lets one concurrent write slip in before the first CAS.
    struct RacingStore {
        inner: MemoryStore,
        raced: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl KvStore for RacingStore {
        fn backend_name(&self) -> &'static str {
            "racing"
        }
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key).await
        }
        async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.inner.set(key, value).await
        }
        async fn compare_and_swap(
            &self,
            key: &str,
            expected: Option<&str>,
            new: &str,
        ) -> Result<bool, StoreError> {
            if !self.raced.swap(true, std::sync::atomic::Ordering::SeqCst) {
                self.inner.set(key, "[1]").await?;
            }
            self.inner.compare_and_swap(key, expected, new).await
        }
        async fn delete(&self, key: &str) -> Result<(), StoreError> {
            self.inner.delete(key).await
        }
    }

    #[tokio::test]
    async fn lost_race_is_retried_on_fresh_data() {
        let store = Arc::new(RacingStore {
            inner: MemoryStore::new(),
            raced: Default::default(),
        });
        let mut calls = 0;
        mutate(store.as_ref(), "nums", |v: &mut Vec<u32>| {
            calls += 1;
            v.push(2);
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(calls, 2);
        // The concurrent write survived alongside ours.
        assert_eq!(store.inner.get("nums").await.unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn patch_merges_and_protects_immutable_fields() {
        let current = Counter { id: "a".into(), n: 1 };
        let patch = json!({"id": "b", "n": 5}).as_object().unwrap().clone();
        let updated = apply_patch(&current, &patch, &["id"]).unwrap();
        assert_eq!(updated, Counter { id: "a".into(), n: 5 });
    }

    #[test]
    fn empty_patch_is_identity() {
        let current = Counter { id: "a".into(), n: 1 };
        let updated = apply_patch(&current, &Map::new(), &["id"]).unwrap();
        assert_eq!(updated, current);
    }

    #[test]
    fn patch_type_mismatch_and_rule_violation_are_validation_errors() {
        let current = Counter { id: "a".into(), n: 1 };
        let wrong_type = json!({"n": "five"}).as_object().unwrap().clone();
        assert_matches!(apply_patch(&current, &wrong_type, &[]), Err(CoreError::Validation(_)));

        let out_of_range = json!({"n": 11}).as_object().unwrap().clone();
        assert_matches!(apply_patch(&current, &out_of_range, &[]), Err(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn corrupt_document_is_a_persistence_error() {
        let store = MemoryStore::new();
        store.set("nums", "oops").await.unwrap();
        assert_matches!(
            load::<Vec<u32>>(&store, "nums").await,
            Err(CoreError::Persistence(_))
        );
    }
}
