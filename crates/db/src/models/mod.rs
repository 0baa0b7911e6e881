//! Persisted record shapes and their input DTOs.
//!
//! Records serialize as camelCase JSON, matching the documents already
//! stored by earlier deployments of the site.

pub mod fan_art;
pub mod featured_work;
pub mod profile;

/// Serde default for `isActive` on records that predate the flag.
pub(crate) fn default_active() -> bool {
    true
}
