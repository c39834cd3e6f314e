//! Elo rating math
//!
//! Pure functions over rating numbers; nothing here touches contest state.
//! All rating changes in the engine flow through [`update_map`].

use std::collections::BTreeMap;

use crate::app::contest_config::ELO_SCALE;
use crate::domain::entities::PhotoId;

/// New ratings and per-party deltas after a single decided match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingUpdate {
    pub winner: i32,
    pub loser: i32,
    pub winner_delta: i32,
    pub loser_delta: i32,
}

/// Expected score of `rating` against `opponent` (probability-like, in
/// (0, 1)).
pub fn expected_score(rating: i32, opponent: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) as f64 / ELO_SCALE))
}

/// Compute both parties' new ratings after the winner beat the loser.
///
/// Each new rating is rounded to the nearest integer independently, so
/// `winner_delta + loser_delta` can be off zero by one point. That asymmetry
/// is part of the contract; callers must not re-balance it.
pub fn compute_update(winner: i32, loser: i32, k: i32) -> RatingUpdate {
    let expected_winner = expected_score(winner, loser);
    let expected_loser = expected_score(loser, winner);

    let new_winner = (winner as f64 + k as f64 * (1.0 - expected_winner)).round() as i32;
    let new_loser = (loser as f64 + k as f64 * (0.0 - expected_loser)).round() as i32;

    RatingUpdate {
        winner: new_winner,
        loser: new_loser,
        winner_delta: new_winner - winner,
        loser_delta: new_loser - loser,
    }
}

/// Return a ratings map with exactly the winner's and loser's entries
/// replaced. Pure transform: the caller's map is untouched.
pub fn update_map(
    winner_id: PhotoId,
    loser_id: PhotoId,
    ratings: &BTreeMap<PhotoId, i32>,
    k: i32,
) -> (BTreeMap<PhotoId, i32>, RatingUpdate) {
    use crate::app::contest_config::DEFAULT_RATING;

    let winner_rating = ratings.get(&winner_id).copied().unwrap_or(DEFAULT_RATING);
    let loser_rating = ratings.get(&loser_id).copied().unwrap_or(DEFAULT_RATING);
    let update = compute_update(winner_rating, loser_rating, k);

    let mut next = ratings.clone();
    next.insert(winner_id, update.winner);
    next.insert(loser_id, update.loser);
    (next, update)
}
