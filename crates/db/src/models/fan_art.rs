//! Fan-art entity model and DTOs.

use fansite_core::types::{RecordId, Timestamp};
use fansite_core::validation::{validate_image_source, validate_not_blank, validate_web_url};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::default_active;

/// A community fan-art entry stored in the `fanart_gallery` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FanArt {
    pub id: RecordId,
    #[validate(custom(function = "validate_image_source"))]
    pub image: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub creator_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_web_url"))]
    pub creator_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 5, message = "Admin rating must be a number between 1 and 5"))]
    pub admin_rating: Option<u8>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub dislikes: u64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

/// DTO for submitting a new fan-art entry.
///
/// `image` and `creatorName` default to empty so that a missing field is
/// reported by validation rather than as a JSON shape error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFanArt {
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub creator_name: String,
    pub creator_link: Option<String>,
    pub admin_rating: Option<u8>,
    /// Defaults to 0 if omitted.
    pub likes: Option<u64>,
    /// Defaults to 0 if omitted.
    pub dislikes: Option<u64>,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}

impl CreateFanArt {
    pub fn new(image: impl Into<String>, creator_name: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            creator_name: creator_name.into(),
            ..Self::default()
        }
    }
}
