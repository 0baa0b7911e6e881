//! Domain types and rules for the fan-site content API.
//!
//! Nothing here touches storage or HTTP; the db and api crates build on it.

pub mod error;
pub mod media;
pub mod profile;
pub mod types;
pub mod validation;
pub mod vote;
