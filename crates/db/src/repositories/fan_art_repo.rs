//! Repository for the `fanart_gallery` collection.

use chrono::Utc;
use fansite_core::error::CoreError;
use fansite_core::types::new_record_id;
use fansite_core::validation::normalize_optional_text;
use serde_json::{Map, Value};
use validator::Validate;

use super::document::{apply_patch, blank_to_null, load, mutate, Record};
use super::vote_ledger::ballot_key;
use crate::models::fan_art::{CreateFanArt, FanArt};
use crate::store::KvStore;

/// Fields a patch may never overwrite.
const IMMUTABLE_FIELDS: &[&str] = &["id", "createdAt"];
const OPTIONAL_TEXT_FIELDS: &[&str] = &["creatorLink"];

impl Record for FanArt {
    const ENTITY: &'static str = "Fan art";
    const KEY: &'static str = "fanart_gallery";

    fn id(&self) -> &str {
        &self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Provides CRUD operations for fan-art entries.
pub struct FanArtRepo;

impl FanArtRepo {
    /// All entries in submission order.
    pub async fn list(store: &dyn KvStore) -> Result<Vec<FanArt>, CoreError> {
        load(store, FanArt::KEY).await
    }

    /// Entries shown in the public carousel.
    pub async fn list_active(store: &dyn KvStore) -> Result<Vec<FanArt>, CoreError> {
        let mut all = Self::list(store).await?;
        all.retain(Record::is_active);
        Ok(all)
    }

    pub async fn find_by_id(store: &dyn KvStore, id: &str) -> Result<Option<FanArt>, CoreError> {
        Ok(Self::list(store).await?.into_iter().find(|a| a.id == id))
    }

    /// Append a new entry, returning it with its assigned id and timestamp.
    ///
    /// Text fields are trimmed; `creatorLink` collapses to unset when blank.
    pub async fn create(store: &dyn KvStore, input: &CreateFanArt) -> Result<FanArt, CoreError> {
        let image = input.image.trim();
        let creator_name = input.creator_name.trim();
        if image.is_empty() || creator_name.is_empty() {
            return Err(CoreError::Validation(
                "Image and creator name are required".into(),
            ));
        }

        let template = FanArt {
            id: String::new(),
            image: image.to_string(),
            creator_name: creator_name.to_string(),
            creator_link: normalize_optional_text(input.creator_link.clone()),
            admin_rating: input.admin_rating,
            likes: input.likes.unwrap_or(0),
            dislikes: input.dislikes.unwrap_or(0),
            is_active: input.is_active.unwrap_or(true),
            created_at: Some(Utc::now()),
        };
        template.validate()?;

        let created = mutate(store, FanArt::KEY, |all: &mut Vec<FanArt>| {
            let mut art = template.clone();
            art.id = unique_id(all);
            all.push(art.clone());
            Ok(art)
        })
        .await?;

        tracing::info!(fan_art_id = %created.id, creator = %created.creator_name, "Fan art created");
        Ok(created)
    }

    /// Shallow-merge `patch` into the entry with `id`.
    ///
    /// `id` and `createdAt` in the patch are ignored and a blank
    /// `creatorLink` unsets the link. An empty patch returns the entry
    /// unchanged.
    pub async fn update(
        store: &dyn KvStore,
        id: &str,
        patch: &Map<String, Value>,
    ) -> Result<FanArt, CoreError> {
        let patch = blank_to_null(patch, OPTIONAL_TEXT_FIELDS);
        mutate(store, FanArt::KEY, |all: &mut Vec<FanArt>| {
            let slot = all
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| CoreError::not_found(FanArt::ENTITY, id))?;
            *slot = apply_patch(slot, &patch, IMMUTABLE_FIELDS)?;
            Ok(slot.clone())
        })
        .await
    }

    /// Remove the entry with `id` along with its ballots.
    ///
    /// Returns `true` if an entry was removed. Removing an unknown id is a
    /// successful no-op.
    pub async fn delete(store: &dyn KvStore, id: &str) -> Result<bool, CoreError> {
        let removed = mutate(store, FanArt::KEY, |all: &mut Vec<FanArt>| {
            let before = all.len();
            all.retain(|a| a.id != id);
            Ok(all.len() != before)
        })
        .await?;

        if removed {
            if let Ok(key) = ballot_key(id) {
                store.delete(&key).await?;
            }
            tracing::info!(fan_art_id = %id, "Fan art deleted");
        }
        Ok(removed)
    }
}

/// Fresh id not already used in `existing`.
pub(crate) fn unique_id<R: Record>(existing: &[R]) -> String {
    loop {
        let id = new_record_id();
        if !existing.iter().any(|r| r.id() == id) {
            return id;
        }
    }
}
