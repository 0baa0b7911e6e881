use chrono::Utc;
use fansite_core::error::CoreError;
use fansite_core::media::MediaKind;
use fansite_core::validation::normalize_optional_text;
use serde_json::{Map, Value};
use validator::Validate;

use super::document::{apply_patch, blank_to_null, load, mutate, Record};
use super::fan_art_repo::unique_id;
use crate::models::featured_work::{CreateFeaturedWork, FeaturedWork};
use crate::store::KvStore;

const IMMUTABLE_FIELDS: &[&str] = &["id", "createdAt"];
const OPTIONAL_TEXT_FIELDS: &[&str] = &["title", "posterUrl"];

impl Record for FeaturedWork {
    const ENTITY: &'static str = "Featured work";
    const KEY: &'static str = "featured_works";

    fn id(&self) -> &str {
        &self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Provides CRUD operations for the curated featured-works gallery.
pub struct FeaturedWorkRepo;

impl FeaturedWorkRepo {
    pub async fn list(store: &dyn KvStore) -> Result<Vec<FeaturedWork>, CoreError> {
        load(store, FeaturedWork::KEY).await
    }

    pub async fn list_active(store: &dyn KvStore) -> Result<Vec<FeaturedWork>, CoreError> {
        let mut all = Self::list(store).await?;
        all.retain(Record::is_active);
        Ok(all)
    }

    pub async fn find_by_id(
        store: &dyn KvStore,
        id: &str,
    ) -> Result<Option<FeaturedWork>, CoreError> {
        Ok(Self::list(store).await?.into_iter().find(|w| w.id == id))
    }

    pub async fn create(
        store: &dyn KvStore,
        input: &CreateFeaturedWork,
    ) -> Result<FeaturedWork, CoreError> {
        let url = input.url.trim();
        if url.is_empty() || input.kind.trim().is_empty() {
            return Err(CoreError::Validation(
                "URL and kind (image/video/gif) are required".into(),
            ));
        }
        let kind = MediaKind::from_name(input.kind.trim())?;

        let template = FeaturedWork {
            id: String::new(),
            url: url.to_string(),
            title: normalize_optional_text(input.title.clone()),
            kind,
            poster_url: normalize_optional_text(input.poster_url.clone()),
            is_active: input.is_active.unwrap_or(true),
            created_at: Some(Utc::now()),
        };
        template.validate()?;

        let created = mutate(store, FeaturedWork::KEY, |all: &mut Vec<FeaturedWork>| {
            let mut work = template.clone();
            work.id = unique_id(all);
            all.push(work.clone());
            Ok(work)
        })
        .await?;

        tracing::info!(featured_work_id = %created.id, kind = created.kind.name(), "Featured work created");
        Ok(created)
    }

    /// Shallow-merge `patch` into the work with `id`. `id` and `createdAt`
    /// are ignored; a blank `title` or `posterUrl` unsets the field.
    pub async fn update(
        store: &dyn KvStore,
        id: &str,
        patch: &Map<String, Value>,
    ) -> Result<FeaturedWork, CoreError> {
        if let Some(kind) = patch.get("kind") {
            // Friendly enum message instead of the serde one.
            MediaKind::from_name(kind.as_str().unwrap_or_default())?;
        }
        let patch = blank_to_null(patch, OPTIONAL_TEXT_FIELDS);

        mutate(store, FeaturedWork::KEY, |all: &mut Vec<FeaturedWork>| {
            let slot = all
                .iter_mut()
                .find(|w| w.id == id)
                .ok_or_else(|| CoreError::not_found(FeaturedWork::ENTITY, id))?;
            *slot = apply_patch(slot, &patch, IMMUTABLE_FIELDS)?;
            Ok(slot.clone())
        })
        .await
    }

    /// Remove the work with `id`. Returns whether anything was removed.
    pub async fn delete(store: &dyn KvStore, id: &str) -> Result<bool, CoreError> {
        let removed = mutate(store, FeaturedWork::KEY, |all: &mut Vec<FeaturedWork>| {
            let before = all.len();
            all.retain(|w| w.id != id);
            Ok(all.len() != before)
        })
        .await?;
        if removed {
            tracing::info!(featured_work_id = %id, "Featured work deleted");
        }
        Ok(removed)
    }
}
