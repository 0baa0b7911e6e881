//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for list endpoints supporting `?activeOnly=true`.
///
/// Used by the fan-art and featured-works listings. Any value other than
/// `true` lists every record.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveOnlyParams {
    pub active_only: Option<String>,
}

impl ActiveOnlyParams {
    pub fn active_only(&self) -> bool {
        self.active_only.as_deref() == Some("true")
    }
}
