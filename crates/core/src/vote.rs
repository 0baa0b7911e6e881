//! Like/dislike vote types and counter transitions.
//!
//! Anonymous votes always add one to a counter. Votes carrying a visitor
//! token go through [`vote_transition`], which turns the visitor's previous
//! and next choice into counter deltas so repeats are idempotent and
//! switches move a single count.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A cast vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Like,
    Dislike,
}

/// Wire value retracting a previous vote.
pub const VOTE_NONE: &str = "none";

impl VoteType {
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            _ => Err(CoreError::Validation(
                "Invalid vote type. Must be \"like\" or \"dislike\"".into(),
            )),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

/// Parse a choice that may also be `"none"` (retraction).
pub fn parse_choice(name: &str) -> Result<Option<VoteType>, CoreError> {
    if name == VOTE_NONE {
        return Ok(None);
    }
    VoteType::from_name(name).map(Some)
}

/// Signed change to apply to the like and dislike counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteDelta {
    pub likes: i64,
    pub dislikes: i64,
}

impl VoteDelta {
    pub fn is_noop(self) -> bool {
        self.likes == 0 && self.dislikes == 0
    }

    /// Delta for a single anonymous vote.
    pub fn increment(vote: VoteType) -> Self {
        match vote {
            VoteType::Like => Self { likes: 1, dislikes: 0 },
            VoteType::Dislike => Self { likes: 0, dislikes: 1 },
        }
    }
}

/// Counter deltas for a visitor moving from `previous` to `next`.
///
/// | previous | next    | likes | dislikes |
/// |----------|---------|-------|----------|
/// | none     | like    | +1    | 0        |
/// | like     | like    | 0     | 0        |
/// | like     | dislike | -1    | +1       |
/// | like     | none    | -1    | 0        |
pub fn vote_transition(previous: Option<VoteType>, next: Option<VoteType>) -> VoteDelta {
    if previous == next {
        return VoteDelta::default();
    }
    let mut delta = VoteDelta::default();
    match previous {
        Some(VoteType::Like) => delta.likes -= 1,
        Some(VoteType::Dislike) => delta.dislikes -= 1,
        None => {}
    }
    match next {
        Some(VoteType::Like) => delta.likes += 1,
        Some(VoteType::Dislike) => delta.dislikes += 1,
        None => {}
    }
    delta
}

/// Apply a signed delta to a counter, saturating at zero.
pub fn apply_delta(count: u64, delta: i64) -> u64 {
    if delta >= 0 {
        count.saturating_add(delta.unsigned_abs())
    } else {
        count.saturating_sub(delta.unsigned_abs())
    }
}
