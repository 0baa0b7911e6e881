//! Request guards used as handler extractors.
//!
//! - [`admin::RequireAdmin`] -- Requires the shared admin secret when one is configured.
//! - [`visitor::VisitorToken`] -- Optional anonymous visitor token for vote tracking.

pub mod admin;
pub mod visitor;
