//! Streamer profile constants.

use serde::{Deserialize, Serialize};

/// Live indicator shown next to the avatar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    Live,
    #[default]
    Offline,
}

/// Display name used until the admin sets one.
pub const DEFAULT_NAME: &str = "Streamer";

/// Bio used until the admin sets one.
pub const DEFAULT_BIO: &str =
    "Gaming content creator and streamer. Join me for epic adventures and unforgettable moments!";

/// Generated placeholder avatar.
pub const DEFAULT_AVATAR: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=streamer";

/// Profile fields that always hold a value. Blank or `null` values for these
/// in an update are ignored rather than stored.
pub const REQUIRED_FIELDS: &[&str] = &["name", "bio", "avatar", "twitchStatus"];
