//! Like/dislike counters on fan-art entries.
//!
//! Anonymous votes add one to a counter every time. Votes carrying a
//! visitor token are also recorded in a ballot document under
//! `fanart_votes:{id}`, keyed by a SHA-256 digest of the token, so a
//! visitor repeating, switching or retracting a vote moves the counters by
//! at most one each.
//!
//! The ballot and the counters live under different keys and are committed
//! one after the other. When the counter write fails the visitor's ballot
//! entry is put back, so a retried vote is counted.

use std::collections::BTreeMap;

use fansite_core::error::CoreError;
use fansite_core::validation::validate_visitor_token;
use fansite_core::vote::{apply_delta, vote_transition, VoteDelta, VoteType};
use sha2::{Digest, Sha256};

use super::document::{mutate, Record};
use crate::models::fan_art::FanArt;
use crate::store::{get_json, validate_key, KvStore, StoreError};

/// Visitor digest -> current choice.
type Ballot = BTreeMap<String, VoteType>;

/// Result of a vote request.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteOutcome {
    /// The entry with its counters after the vote.
    pub fan_art: FanArt,
    /// The visitor's standing choice (always the cast vote for anonymous votes).
    pub choice: Option<VoteType>,
    /// Whether any counter moved.
    pub changed: bool,
}

pub struct VoteLedger;

impl VoteLedger {
    /// Record a vote on the fan-art entry `id`.
    ///
    /// `choice == None` retracts and is only meaningful with a `visitor`.
    pub async fn vote(
        store: &dyn KvStore,
        id: &str,
        choice: Option<VoteType>,
        visitor: Option<&str>,
    ) -> Result<VoteOutcome, CoreError> {
        match visitor {
            None => {
                let vote = choice.ok_or_else(|| {
                    CoreError::Validation(
                        "Retracting a vote requires a visitor token".into(),
                    )
                })?;
                let fan_art = apply_counters(store, id, VoteDelta::increment(vote)).await?;
                tracing::debug!(fan_art_id = %id, vote = vote.name(), "Anonymous vote recorded");
                Ok(VoteOutcome {
                    fan_art,
                    choice,
                    changed: true,
                })
            }
            Some(token) => {
                validate_visitor_token(token)?;
                Self::tokened_vote(store, id, choice, token).await
            }
        }
    }

    /// The standing choice of `visitor` on entry `id`, if any.
    pub async fn current_choice(
        store: &dyn KvStore,
        id: &str,
        visitor: &str,
    ) -> Result<Option<VoteType>, CoreError> {
        let key = ballot_key(id)?;
        let ballot: Option<Ballot> = get_json(store, &key).await?;
        Ok(ballot.and_then(|b| b.get(&visitor_digest(visitor)).copied()))
    }

    async fn tokened_vote(
        store: &dyn KvStore,
        id: &str,
        choice: Option<VoteType>,
        token: &str,
    ) -> Result<VoteOutcome, CoreError> {
        // Reject unknown ids before a ballot document is created for them.
        let existing = super::FanArtRepo::find_by_id(store, id)
            .await?
            .ok_or_else(|| CoreError::not_found(FanArt::ENTITY, id))?;

        let digest = visitor_digest(token);
        let key = ballot_key(id)?;
        let previous = mutate(store, &key, |ballot: &mut Ballot| {
            let previous = ballot.get(&digest).copied();
            match choice {
                Some(vote) => ballot.insert(digest.clone(), vote),
                None => ballot.remove(&digest),
            };
            Ok(previous)
        })
        .await?;

        let delta = vote_transition(previous, choice);
        if delta.is_noop() {
            return Ok(VoteOutcome {
                fan_art: existing,
                choice,
                changed: false,
            });
        }

        let fan_art = match apply_counters(store, id, delta).await {
            Ok(fan_art) => fan_art,
            Err(err) => {
                let entry_gone = matches!(err, CoreError::NotFound { .. });
                restore_ballot(store, &key, &digest, previous, entry_gone).await;
                return Err(err);
            }
        };
        tracing::debug!(
            fan_art_id = %id,
            likes = delta.likes,
            dislikes = delta.dislikes,
            "Ballot vote recorded"
        );
        Ok(VoteOutcome {
            fan_art,
            choice,
            changed: true,
        })
    }
}

/// Store key of the ballot document for entry `id`.
pub(crate) fn ballot_key(id: &str) -> Result<String, StoreError> {
    let key = format!("fanart_votes:{id}");
    validate_key(&key)?;
    Ok(key)
}

fn visitor_digest(token: &str) -> String {
    Sha256::digest(token.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Undo a ballot write whose counter update failed. When the entry itself
/// is gone the whole ballot document goes with it.
async fn restore_ballot(
    store: &dyn KvStore,
    key: &str,
    digest: &str,
    previous: Option<VoteType>,
    entry_gone: bool,
) {
    let result = if entry_gone {
        store.delete(key).await.map_err(CoreError::from)
    } else {
        mutate(store, key, |ballot: &mut Ballot| {
            match previous {
                Some(vote) => ballot.insert(digest.to_string(), vote),
                None => ballot.remove(digest),
            };
            Ok(())
        })
        .await
    };
    if let Err(err) = result {
        tracing::warn!(key, error = %err, "Failed to restore ballot after counter write failed");
    }
}

async fn apply_counters(
    store: &dyn KvStore,
    id: &str,
    delta: VoteDelta,
) -> Result<FanArt, CoreError> {
    mutate(store, FanArt::KEY, |all: &mut Vec<FanArt>| {
        let art = all
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::not_found(FanArt::ENTITY, id))?;
        art.likes = apply_delta(art.likes, delta.likes);
        art.dislikes = apply_delta(art.dislikes, delta.dislikes);
        Ok(art.clone())
    })
    .await
}
