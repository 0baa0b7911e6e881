use fansite_core::error::CoreError;
use fansite_core::profile::REQUIRED_FIELDS;
use serde_json::{Map, Value};

use super::document::{apply_patch, load, mutate};
use crate::models::profile::Profile;
use crate::store::KvStore;

const PROFILE_KEY: &str = "profile_data";
const SOCIAL_LINKS_FIELD: &str = "socialLinks";

/// Reads and updates the profile singleton.
pub struct ProfileRepo;

impl ProfileRepo {
    /// The stored profile, or the built-in default when none was saved.
    pub async fn get(store: &dyn KvStore) -> Result<Profile, CoreError> {
        load(store, PROFILE_KEY).await
    }

    /// Shallow-merge `patch` onto the current profile and persist it.
    ///
    /// `null` or blank values for the always-present fields (`name`, `bio`,
    /// `avatar`, `twitchStatus`) are skipped. `socialLinks` is replaced as
    /// a whole when present and skipped when `null`.
    pub async fn update(
        store: &dyn KvStore,
        patch: &Map<String, Value>,
    ) -> Result<Profile, CoreError> {
        let patch = strip_ignored_fields(patch);
        let updated = mutate(store, PROFILE_KEY, |profile: &mut Profile| {
            *profile = apply_patch(profile, &patch, &[])?;
            Ok(profile.clone())
        })
        .await?;
        tracing::info!(fields = ?patch.keys().collect::<Vec<_>>(), "Profile updated");
        Ok(updated)
    }
}

fn strip_ignored_fields(patch: &Map<String, Value>) -> Map<String, Value> {
    patch
        .iter()
        .filter(|(field, value)| {
            if field.as_str() == SOCIAL_LINKS_FIELD {
                return !value.is_null();
            }
            if !REQUIRED_FIELDS.contains(&field.as_str()) {
                return true;
            }
            match value {
                Value::Null => false,
                Value::String(s) => !s.trim().is_empty(),
                _ => true,
            }
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use fansite_core::profile::{StreamStatus, DEFAULT_NAME};
    use serde_json::json;

    use super::*;
    use crate::store::MemoryStore;

    fn patch(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn get_returns_default_when_unset() {
        let store = MemoryStore::new();
        let profile = ProfileRepo::get(&store).await.unwrap();
        assert_eq!(profile, Profile::default());
        assert_eq!(profile.name, DEFAULT_NAME);
    }

    #[tokio::test]
    async fn update_merges_onto_current() {
        let store = MemoryStore::new();
        ProfileRepo::update(&store, &patch(json!({"name": "Hero"})))
            .await
            .unwrap();
        let updated = ProfileRepo::update(&store, &patch(json!({"twitchStatus": "live"})))
            .await
            .unwrap();
        assert_eq!(updated.name, "Hero");
        assert_eq!(updated.twitch_status, StreamStatus::Live);
        assert_eq!(ProfileRepo::get(&store).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn blank_required_fields_are_ignored() {
        let store = MemoryStore::new();
        let updated = ProfileRepo::update(
            &store,
            &patch(json!({"name": "  ", "bio": null, "subtitle": "Hi"})),
        )
        .await
        .unwrap();
        assert_eq!(updated.name, DEFAULT_NAME);
        assert_eq!(updated.bio, Profile::default().bio);
        assert_eq!(updated.subtitle.as_deref(), Some("Hi"));
    }

    #[tokio::test]
    async fn null_social_links_keep_the_current_ones() {
        let store = MemoryStore::new();
        ProfileRepo::update(
            &store,
            &patch(json!({"socialLinks": {"twitch": "https://twitch.tv/a"}})),
        )
        .await
        .unwrap();
        let updated = ProfileRepo::update(&store, &patch(json!({"socialLinks": null, "bio": "Hi"})))
            .await
            .unwrap();
        assert_eq!(updated.social_links.twitch.as_deref(), Some("https://twitch.tv/a"));
        assert_eq!(updated.bio, "Hi");
    }

    #[tokio::test]
    async fn invalid_values_are_rejected() {
        let store = MemoryStore::new();
        assert_matches!(
            ProfileRepo::update(&store, &patch(json!({"twitchStatus": "away"}))).await,
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            ProfileRepo::update(&store, &patch(json!({"socialLinks": {"twitch": "twitch"}}))).await,
            Err(CoreError::Validation(msg)) if msg.contains("twitch")
        );
        assert_eq!(store.get(PROFILE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn social_links_are_replaced_whole() {
        let store = MemoryStore::new();
        ProfileRepo::update(
            &store,
            &patch(json!({"socialLinks": {"twitch": "https://twitch.tv/a", "discord": ""}})),
        )
        .await
        .unwrap();
        let updated = ProfileRepo::update(
            &store,
            &patch(json!({"socialLinks": {"youtube": "https://youtube.com/@a"}})),
        )
        .await
        .unwrap();
        assert_eq!(updated.social_links.twitch, None);
        assert_eq!(
            updated.social_links.youtube.as_deref(),
            Some("https://youtube.com/@a")
        );
    }
}
