//! Score and tier normalization
//!
//! Maps raw ratings onto the bounded 0-100 display score and its tier. The
//! hybrid win/loss blend exists only for the legacy all-play-all phase kept
//! for old persisted contests.

use std::collections::BTreeMap;

use crate::app::contest_config::{
    DEFAULT_RATING, ELO_WEIGHT, MIDPOINT_SCORE, WIN_LOSS_WEIGHT,
};
use crate::domain::entities::{PhotoId, PhotoStats, RatingRange, ScoreTier, Tier};

/// Min/max over the current ratings. An empty map yields the default rating
/// on both ends, which [`normalize`] turns into the midpoint score.
pub fn rating_range(ratings: &BTreeMap<PhotoId, i32>) -> RatingRange {
    let mut values = ratings.values();
    let Some(&first) = values.next() else {
        return RatingRange {
            min: DEFAULT_RATING,
            max: DEFAULT_RATING,
        };
    };
    let (min, max) = values.fold((first, first), |(min, max), &r| {
        (min.min(r), max.max(r))
    });
    RatingRange { min, max }
}

/// Linearly rescale a rating into [0, 100] against the given range.
///
/// A degenerate range (min == max) means the ratings carry no ordering
/// information yet; the midpoint score is returned rather than dividing by
/// zero.
pub fn normalize(rating: i32, min: i32, max: i32) -> i32 {
    if min == max {
        return MIDPOINT_SCORE;
    }
    let clamped = rating.clamp(min, max);
    (((clamped - min) as f64 / (max - min) as f64) * 100.0).round() as i32
}

/// Legacy blend of normalized Elo score and win/loss ratio.
///
/// With no games played the win/loss component reports the midpoint.
pub fn hybrid_score(elo_score: i32, wins: u32, losses: u32) -> i32 {
    let games = wins + losses;
    let wl_score = if games == 0 {
        MIDPOINT_SCORE
    } else {
        ((wins as f64 / games as f64) * 100.0).round() as i32
    };
    let blended = (elo_score as f64 * ELO_WEIGHT + wl_score as f64 * WIN_LOSS_WEIGHT).round() as i32;
    blended.clamp(0, 100)
}

/// Compute the score/tier cache for every rated photo.
///
/// `use_hybrid` is only set on the legacy final path, and only has an effect
/// when a stats cache is available for the photo.
pub fn scores_and_tiers(
    ratings: &BTreeMap<PhotoId, i32>,
    stats: Option<&BTreeMap<PhotoId, PhotoStats>>,
    range: RatingRange,
    use_hybrid: bool,
) -> BTreeMap<PhotoId, ScoreTier> {
    ratings
        .iter()
        .map(|(id, &rating)| {
            let elo_score = normalize(rating, range.min, range.max);
            let score = match (use_hybrid, stats.and_then(|s| s.get(id))) {
                (true, Some(stats)) => hybrid_score(elo_score, stats.wins, stats.losses),
                _ => elo_score,
            };
            (
                *id,
                ScoreTier {
                    score,
                    tier: Tier::for_score(score),
                    rating,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn id(n: u128) -> PhotoId {
        PhotoId(Uuid::from_u128(n))
    }

    #[test]
    fn empty_ratings_yield_default_range() {
        let range = rating_range(&BTreeMap::new());
        assert_eq!(range, RatingRange { min: 1500, max: 1500 });
    }

    #[test]
    fn range_spans_min_and_max() {
        let ratings: BTreeMap<PhotoId, i32> =
            [(id(1), 1484), (id(2), 1516), (id(3), 1500)].into_iter().collect();
        let range = rating_range(&ratings);
        assert_eq!(range, RatingRange { min: 1484, max: 1516 });
    }

    #[test]
    fn normalize_midpoint_on_degenerate_range() {
        assert_eq!(normalize(1500, 1500, 1500), 50);
        assert_eq!(normalize(1700, 1500, 1500), 50);
    }

    #[test]
    fn normalize_linear_rescale() {
        assert_eq!(normalize(1600, 1500, 1700), 50);
        assert_eq!(normalize(1500, 1500, 1700), 0);
        assert_eq!(normalize(1700, 1500, 1700), 100);
    }

    #[test]
    fn normalize_clamps_out_of_range_ratings() {
        assert_eq!(normalize(1400, 1500, 1700), 0);
        assert_eq!(normalize(1800, 1500, 1700), 100);
    }

    #[test]
    fn normalize_is_monotonic() {
        let mut last = -1;
        for rating in 1500..=1700 {
            let score = normalize(rating, 1500, 1700);
            assert!(score >= last);
            assert!((0..=100).contains(&score));
            last = score;
        }
    }

    #[test]
    fn hybrid_score_without_games_uses_midpoint() {
        // wl = 50, blend = 80*0.3 + 50*0.7 = 59
        assert_eq!(hybrid_score(80, 0, 0), 59);
    }

    #[test]
    fn hybrid_score_weighs_win_ratio_heavier() {
        // wl = 100, blend = 0*0.3 + 100*0.7 = 70
        assert_eq!(hybrid_score(0, 3, 0), 70);
        // wl = 0, blend = 100*0.3 + 0*0.7 = 30
        assert_eq!(hybrid_score(100, 0, 3), 30);
    }

    #[test]
    fn scores_and_tiers_elo_only() {
        let ratings: BTreeMap<PhotoId, i32> =
            [(id(1), 1484), (id(2), 1516)].into_iter().collect();
        let range = rating_range(&ratings);
        let scores = scores_and_tiers(&ratings, None, range, false);

        assert_eq!(scores[&id(1)].score, 0);
        assert_eq!(scores[&id(2)].score, 100);
        assert_eq!(scores[&id(1)].tier, Tier::Discard);
        assert_eq!(scores[&id(2)].tier, Tier::Masterpiece);
        assert_eq!(scores[&id(2)].rating, 1516);
    }

    #[test]
    fn scores_and_tiers_hybrid_blends_stats() {
        let ratings: BTreeMap<PhotoId, i32> =
            [(id(1), 1484), (id(2), 1516)].into_iter().collect();
        let stats: BTreeMap<PhotoId, PhotoStats> = [
            (id(1), PhotoStats { wins: 3, losses: 0, rating: 1484, rank: 0 }),
            (id(2), PhotoStats { wins: 0, losses: 3, rating: 1516, rank: 0 }),
        ]
        .into_iter()
        .collect();
        let range = rating_range(&ratings);
        let scores = scores_and_tiers(&ratings, Some(&stats), range, true);

        // elo 0 but perfect record: 0*0.3 + 100*0.7 = 70
        assert_eq!(scores[&id(1)].score, 70);
        // elo 100 but winless: 100*0.3 + 0*0.7 = 30
        assert_eq!(scores[&id(2)].score, 30);
    }
}
