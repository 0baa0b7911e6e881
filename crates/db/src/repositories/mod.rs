//! Repository layer.
//!
//! Each repository is a zero-sized struct whose associated functions take a
//! `&dyn KvStore` as the first argument, mirroring how handlers hold one
//! shared store handle in application state.

mod document;
pub mod fan_art_repo;
pub mod featured_work_repo;
pub mod profile_repo;
pub mod vote_ledger;

pub use document::{Record, MAX_CAS_ATTEMPTS};
pub use fan_art_repo::FanArtRepo;
pub use featured_work_repo::FeaturedWorkRepo;
pub use profile_repo::ProfileRepo;
pub use vote_ledger::{VoteLedger, VoteOutcome};
