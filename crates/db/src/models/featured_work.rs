//! Featured-work entity model and DTOs.

use fansite_core::media::MediaKind;
use fansite_core::types::{RecordId, Timestamp};
use fansite_core::validation::validate_web_url;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::default_active;

/// An admin-curated gallery item stored in the `featured_works` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedWork {
    pub id: RecordId,
    #[validate(custom(function = "validate_web_url"))]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub kind: MediaKind,
    /// Thumbnail shown before a video starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_web_url"))]
    pub poster_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

/// DTO for creating a featured work.
///
/// `kind` stays a string here so an unknown value produces the
/// "Kind must be one of" message instead of a serde error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeaturedWork {
    #[serde(default)]
    pub url: String,
    pub title: Option<String>,
    #[serde(default)]
    pub kind: String,
    pub poster_url: Option<String>,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_lowercase() {
        let work = FeaturedWork {
            id: "1".into(),
            url: "https://x/clip.mp4".into(),
            title: None,
            kind: MediaKind::Video,
            poster_url: Some("https://x/poster.jpg".into()),
            is_active: true,
            created_at: None,
        };
        let json = serde_json::to_value(&work).unwrap();
        assert_eq!(json["kind"], "video");
        assert_eq!(json["posterUrl"], "https://x/poster.jpg");
        assert!(work.validate().is_ok());
    }

    #[test]
    fn unknown_kind_does_not_deserialize() {
        let result: Result<FeaturedWork, _> =
            serde_json::from_str(r#"{"id":"1","url":"https://x/a.png","kind":"audio"}"#);
        assert!(result.is_err());
    }
}
