//! Contest aggregate
//!
//! `ContestState` is the aggregate root of one ranking contest: the contest
//! phase, the eligible photo ids, their ratings, the append-only match
//! history and the derived stats/score caches. Transitions are driven by the
//! app layer (`app::contest_service`); this module keeps the data shape and
//! read accessors.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::photo::PhotoId;
use crate::domain::entities::stats::{PhotoStats, RankingEntry, RatingRange};
use crate::domain::entities::tier::ScoreTier;

/// Contest lifecycle phase.
///
/// New contests only move `Qualifying -> Finished`. `Final` and `Bracket`
/// exist to read old persisted contests and are coerced forward at load
/// time; they are never entered from a fresh start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestPhase {
    Qualifying,
    Final,
    Bracket,
    Finished,
}

impl ContestPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ContestPhase::Finished)
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, ContestPhase::Final | ContestPhase::Bracket)
    }
}

impl std::fmt::Display for ContestPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContestPhase::Qualifying => write!(f, "qualifying"),
            ContestPhase::Final => write!(f, "final"),
            ContestPhase::Bracket => write!(f, "bracket"),
            ContestPhase::Finished => write!(f, "finished"),
        }
    }
}

/// Which side of the presented pairing won the duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchSide {
    A,
    B,
}

/// One resolved duel. Immutable once appended; insertion order in the
/// history is the authoritative chronology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub a: PhotoId,
    pub b: PhotoId,
    pub winner: PhotoId,
    pub fought_at: DateTime<Utc>,
    pub winner_delta: i32,
    pub loser_delta: i32,
    pub phase: ContestPhase,
}

impl MatchRecord {
    pub fn loser(&self) -> PhotoId {
        if self.winner == self.a {
            self.b
        } else {
            self.a
        }
    }

    /// Unordered pair key: the same two photos yield the same key regardless
    /// of presentation order.
    pub fn pair_key(&self) -> (PhotoId, PhotoId) {
        unordered_pair(self.a, self.b)
    }
}

/// Sort a pair of ids into its canonical unordered key.
pub fn unordered_pair(a: PhotoId, b: PhotoId) -> (PhotoId, PhotoId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Champion rule: highest rating wins, ties broken by ascending id.
pub fn champion_by_rating(ratings: &BTreeMap<PhotoId, i32>) -> Option<PhotoId> {
    ratings
        .iter()
        .fold(None, |best: Option<(PhotoId, i32)>, (&id, &rating)| {
            match best {
                Some((_, best_rating)) if best_rating >= rating => best,
                // BTreeMap iterates ids ascending, so on a tie the earlier
                // (smaller) id is kept by the strict comparison above.
                _ => Some((id, rating)),
            }
        })
        .map(|(id, _)| id)
}

/// Legacy all-play-all bonus round, only ever populated by loading an old
/// persisted contest. Drains its own pair queue, then the contest finishes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegacyFinalRound {
    pub pool: Vec<PhotoId>,
    pub remaining: Vec<(PhotoId, PhotoId)>,
    pub current: Option<(PhotoId, PhotoId)>,
}

impl LegacyFinalRound {
    /// True while the round still has a pending or queued pairing.
    pub fn has_pending_pairings(&self) -> bool {
        self.current.is_some() || !self.remaining.is_empty()
    }
}

/// Authoritative per-contest state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestState {
    pub phase: ContestPhase,
    pub eligible_ids: Vec<PhotoId>,
    pub ratings: BTreeMap<PhotoId, i32>,
    pub history: Vec<MatchRecord>,
    /// The one pairing currently awaiting a verdict, if any.
    pub current_match: Option<(PhotoId, PhotoId)>,
    pub stats: BTreeMap<PhotoId, PhotoStats>,
    pub score_tiers: BTreeMap<PhotoId, ScoreTier>,
    pub rating_range: RatingRange,
    /// When set, resolved matches record history and stats but leave ratings
    /// untouched. Used transitionally by legacy phase handling.
    pub frozen: bool,
    pub champion_id: Option<PhotoId>,
    pub k_factor: i32,
    pub legacy_final: Option<LegacyFinalRound>,
}

impl ContestState {
    /// The pairing the caller should present next, if one is pending.
    /// Covers both the qualifying flow and a live legacy final round.
    pub fn pending_match(&self) -> Option<(PhotoId, PhotoId)> {
        match self.phase {
            ContestPhase::Final => self.legacy_final.as_ref().and_then(|f| f.current),
            _ => self.current_match,
        }
    }

    pub fn champion(&self) -> Option<PhotoId> {
        self.champion_id
    }

    /// Number of eligible participants.
    pub fn participant_count(&self) -> usize {
        self.eligible_ids.len()
    }

    /// Total matches the qualifying round-robin can hold: n(n-1)/2.
    pub fn max_qualifying_matches(&self) -> usize {
        let n = self.eligible_ids.len();
        n * n.saturating_sub(1) / 2
    }

    /// Full ranked list, best first. Joins the stats cache with the derived
    /// score/tier cache.
    pub fn ranking(&self) -> Vec<RankingEntry> {
        let mut entries: Vec<RankingEntry> = self
            .stats
            .iter()
            .map(|(id, stats)| {
                let score_tier = self.score_tiers.get(id);
                RankingEntry {
                    id: *id,
                    rank: stats.rank,
                    rating: stats.rating,
                    wins: stats.wins,
                    losses: stats.losses,
                    score: score_tier.map(|st| st.score).unwrap_or(50),
                    tier: score_tier
                        .map(|st| st.tier)
                        .unwrap_or_else(|| crate::domain::entities::tier::Tier::for_score(50)),
                }
            })
            .collect();
        entries.sort_by_key(|e| e.rank);
        entries
    }
}
