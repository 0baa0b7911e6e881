//! Streamer profile singleton.

use fansite_core::profile::{StreamStatus, DEFAULT_AVATAR, DEFAULT_BIO, DEFAULT_NAME};
use fansite_core::validation::validate_web_url_or_empty;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The single profile document stored under `profile_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub bio: String,
    #[validate(custom(function = "validate_web_url_or_empty"))]
    pub avatar: String,
    #[serde(default)]
    pub twitch_status: StreamStatus,
    /// Hero headline; the client falls back to `name` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_works_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_works_subtitle: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub social_links: SocialLinks,
}

/// Platform links. An empty string means "not shown".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_web_url_or_empty"))]
    pub twitch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_web_url_or_empty"))]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_web_url_or_empty"))]
    pub tiktok: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_web_url_or_empty"))]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_web_url_or_empty"))]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_web_url_or_empty"))]
    pub discord: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            bio: DEFAULT_BIO.to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
            twitch_status: StreamStatus::Offline,
            main_text: None,
            subtitle: None,
            featured_works_title: None,
            featured_works_subtitle: None,
            social_links: SocialLinks::default(),
        }
    }
}
