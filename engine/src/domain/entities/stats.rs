//! Per-photo contest statistics and rank recomputation
//!
//! Stats are a derived cache: everything here is recomputable from the match
//! history plus the ratings map and is never independently authoritative.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::photo::PhotoId;
use crate::domain::entities::tier::Tier;

/// Win/loss record, current rating and rank for one photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoStats {
    pub wins: u32,
    pub losses: u32,
    pub rating: i32,
    /// 1-based rank, assigned by [`recompute_ranks`].
    pub rank: u32,
}

impl PhotoStats {
    pub fn new(rating: i32) -> Self {
        Self {
            wins: 0,
            losses: 0,
            rating,
            rank: 0,
        }
    }
}

/// Min/max over the current ratings, used to normalize scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRange {
    pub min: i32,
    pub max: i32,
}

/// Which sort order ranks are assigned by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingRule {
    /// Primary qualifying/finished order: rating desc, wins desc, losses asc,
    /// id asc.
    Standard,
    /// Legacy all-play-all order: wins-losses desc, wins desc, rating desc,
    /// id asc.
    LegacyHybrid,
}

/// Assign 1-based ranks to every entry in the stats cache.
///
/// Pure and idempotent: ranking already-ranked stats leaves them unchanged.
pub fn recompute_ranks(stats: &mut BTreeMap<PhotoId, PhotoStats>, rule: RankingRule) {
    let mut order: Vec<(PhotoId, PhotoStats)> = stats.iter().map(|(id, s)| (*id, *s)).collect();
    order.sort_by(|(id_a, a), (id_b, b)| match rule {
        RankingRule::Standard => b
            .rating
            .cmp(&a.rating)
            .then(b.wins.cmp(&a.wins))
            .then(a.losses.cmp(&b.losses))
            .then(id_a.cmp(id_b)),
        RankingRule::LegacyHybrid => {
            let margin_a = a.wins as i64 - a.losses as i64;
            let margin_b = b.wins as i64 - b.losses as i64;
            margin_b
                .cmp(&margin_a)
                .then(b.wins.cmp(&a.wins))
                .then(b.rating.cmp(&a.rating))
                .then(id_a.cmp(id_b))
        }
    });
    for (position, (id, _)) in order.iter().enumerate() {
        if let Some(entry) = stats.get_mut(id) {
            entry.rank = position as u32 + 1;
        }
    }
}

/// One row of the final ranked list exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    pub id: PhotoId,
    pub rank: u32,
    pub rating: i32,
    pub wins: u32,
    pub losses: u32,
    pub score: i32,
    pub tier: Tier,
}
