//! Media kinds for featured works.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What a featured-work URL points at. Videos may carry a poster image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Gif,
}

impl MediaKind {
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "gif" => Ok(Self::Gif),
            _ => Err(CoreError::Validation(
                "Kind must be one of: image, video, gif".into(),
            )),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Gif => "gif",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_round_trips_names() {
        for kind in [MediaKind::Image, MediaKind::Video, MediaKind::Gif] {
            assert_eq!(MediaKind::from_name(kind.name()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = MediaKind::from_name("audio").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: Kind must be one of: image, video, gif"
        );
    }
}
