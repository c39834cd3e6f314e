//! Contest state persistence and reconciliation
//!
//! The contest is persisted as a JSON blob holding id references only, never
//! photo payloads. Loading rehydrates those references against the current
//! photo collection: ids that no longer exist are dropped, dangling pairings
//! are cleared so the scheduler produces a fresh one, and deprecated phases
//! from old blobs are migrated forward here — once, at load time — instead
//! of being live branches in the transition logic.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::app::contest_config::{DEFAULT_K_FACTOR, DEFAULT_RATING};
use crate::app::scoring;
use crate::domain::entities::{
    champion_by_rating, ContestPhase, ContestState, LegacyFinalRound, MatchRecord, Photo, PhotoId,
    PhotoStats, RatingRange, ScoreTier,
};
use crate::error::DomainError;

/// Current snapshot schema version. Blobs written before versioning existed
/// deserialize as version 0 and take the same migration path as any other
/// legacy shape.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CurrentMatchSnapshot {
    a_id: PhotoId,
    b_id: PhotoId,
}

/// Persisted contest shape. Every optional field defaults so older blobs
/// missing it still load.
#[derive(Debug, Serialize, Deserialize)]
struct ContestSnapshot {
    #[serde(default)]
    version: u32,
    phase: ContestPhase,
    #[serde(default)]
    eligible_ids: Vec<PhotoId>,
    #[serde(default)]
    ratings: BTreeMap<PhotoId, i32>,
    #[serde(default)]
    history: Vec<MatchRecord>,
    #[serde(default)]
    stats: BTreeMap<PhotoId, PhotoStats>,
    #[serde(default)]
    score_tiers: BTreeMap<PhotoId, ScoreTier>,
    #[serde(default)]
    frozen: bool,
    #[serde(default = "default_rating_range")]
    rating_range: RatingRange,
    #[serde(default)]
    champion_id: Option<PhotoId>,
    #[serde(default = "default_k_factor")]
    k_factor: i32,
    #[serde(default)]
    current_match: Option<CurrentMatchSnapshot>,
    #[serde(default)]
    final_round: Option<LegacyFinalRound>,
}

fn default_rating_range() -> RatingRange {
    RatingRange {
        min: DEFAULT_RATING,
        max: DEFAULT_RATING,
    }
}

fn default_k_factor() -> i32 {
    DEFAULT_K_FACTOR
}

/// Result of loading a blob: the reconciled state plus whether anything had
/// to be repaired (and should therefore be re-persisted).
#[derive(Debug)]
pub struct Restored {
    pub state: ContestState,
    pub repaired: bool,
}

/// Serialize contest state into its persistence blob.
pub fn serialize(state: &ContestState) -> Result<serde_json::Value, DomainError> {
    let snapshot = ContestSnapshot {
        version: SNAPSHOT_VERSION,
        phase: state.phase,
        eligible_ids: state.eligible_ids.clone(),
        ratings: state.ratings.clone(),
        history: state.history.clone(),
        stats: state.stats.clone(),
        score_tiers: state.score_tiers.clone(),
        frozen: state.frozen,
        rating_range: state.rating_range,
        champion_id: state.champion_id,
        k_factor: state.k_factor,
        current_match: state
            .current_match
            .map(|(a, b)| CurrentMatchSnapshot { a_id: a, b_id: b }),
        final_round: state.legacy_final.clone(),
    };
    Ok(serde_json::to_value(snapshot)?)
}

/// Deserialize a blob and reconcile it against the current photo collection.
pub fn restore(blob: serde_json::Value, photos: &[Photo]) -> Result<Restored, DomainError> {
    let snapshot: ContestSnapshot = serde_json::from_value(blob)?;
    let known: BTreeSet<PhotoId> = photos.iter().map(|p| p.id).collect();
    let mut repaired = snapshot.version < SNAPSHOT_VERSION;

    // Drop eligible ids whose photos no longer exist.
    let before = snapshot.eligible_ids.len();
    let mut eligible_ids: Vec<PhotoId> = snapshot
        .eligible_ids
        .into_iter()
        .filter(|id| known.contains(id))
        .collect();
    eligible_ids.dedup();
    if eligible_ids.len() != before {
        tracing::warn!(
            dropped = before - eligible_ids.len(),
            remaining = eligible_ids.len(),
            "persisted contest referenced deleted photos; dropping them"
        );
        repaired = true;
    }
    let eligible: BTreeSet<PhotoId> = eligible_ids.iter().copied().collect();

    // Ratings and stats track the eligible set exactly.
    let mut ratings: BTreeMap<PhotoId, i32> = snapshot
        .ratings
        .into_iter()
        .filter(|(id, _)| eligible.contains(id))
        .collect();
    for id in &eligible_ids {
        ratings.entry(*id).or_insert(DEFAULT_RATING);
    }
    let mut stats: BTreeMap<PhotoId, PhotoStats> = snapshot
        .stats
        .into_iter()
        .filter(|(id, _)| eligible.contains(id))
        .collect();
    for id in &eligible_ids {
        stats
            .entry(*id)
            .or_insert_with(|| PhotoStats::new(ratings[id]));
    }

    // A pairing that references a dropped photo is cleared; the scheduler
    // will produce a fresh one on the next ensure-match.
    let mut current_match = snapshot
        .current_match
        .map(|m| (m.a_id, m.b_id))
        .filter(|(a, b)| eligible.contains(a) && eligible.contains(b));

    let mut legacy_final = snapshot.final_round.map(|mut round| {
        round.pool.retain(|id| eligible.contains(id));
        round
            .remaining
            .retain(|(a, b)| eligible.contains(a) && eligible.contains(b));
        round.current = round
            .current
            .filter(|(a, b)| eligible.contains(a) && eligible.contains(b));
        round
    });

    // Migrate deprecated phases forward.
    let mut phase = snapshot.phase;
    let mut frozen = snapshot.frozen;
    match phase {
        ContestPhase::Bracket => {
            tracing::info!("coercing deprecated bracket phase to finished");
            phase = ContestPhase::Finished;
            legacy_final = None;
            current_match = None;
            repaired = true;
        }
        ContestPhase::Final => {
            let pending = legacy_final
                .as_ref()
                .map(LegacyFinalRound::has_pending_pairings)
                .unwrap_or(false);
            if pending {
                // Let the legacy round drain; ratings stay frozen meanwhile.
                if !frozen {
                    frozen = true;
                    repaired = true;
                }
            } else {
                tracing::info!("legacy final round has no pending pairings; finishing");
                phase = ContestPhase::Finished;
                legacy_final = None;
                repaired = true;
            }
        }
        ContestPhase::Qualifying | ContestPhase::Finished => {}
    }

    // Champion must exist in the reconciled set.
    let mut champion_id = snapshot.champion_id.filter(|id| eligible.contains(id));
    if champion_id != snapshot.champion_id {
        repaired = true;
    }
    if phase == ContestPhase::Finished && champion_id.is_none() {
        champion_id = champion_by_rating(&ratings);
        repaired = true;
    }

    let (rating_range, score_tiers) = if repaired {
        let range = scoring::rating_range(&ratings);
        let tiers = scoring::scores_and_tiers(
            &ratings,
            Some(&stats),
            range,
            phase == ContestPhase::Final,
        );
        (range, tiers)
    } else {
        (snapshot.rating_range, snapshot.score_tiers)
    };

    let state = ContestState {
        phase,
        eligible_ids,
        ratings,
        history: snapshot.history,
        current_match,
        stats,
        score_tiers,
        rating_range,
        frozen,
        champion_id,
        k_factor: snapshot.k_factor,
        legacy_final,
    };

    Ok(Restored { state, repaired })
}
