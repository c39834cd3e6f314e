//! Pairwise round-robin match scheduling
//!
//! Selects the next unordered pair that has not fought yet, preferring the
//! most competitive duel (smallest rating gap) with a lexical tie-break so
//! the sequence is reproducible from identical inputs. Returns `None` only
//! once all n(n-1)/2 pairs have fought.

use std::collections::BTreeSet;

use crate::app::contest_config::DEFAULT_RATING;
use crate::domain::entities::{unordered_pair, ContestPhase, MatchRecord, PhotoId};

/// Pick the next qualifying pairing, or `None` when the round-robin is
/// exhausted.
pub fn next_match(
    eligible: &[PhotoId],
    ratings: &std::collections::BTreeMap<PhotoId, i32>,
    history: &[MatchRecord],
) -> Option<(PhotoId, PhotoId)> {
    let fought: BTreeSet<(PhotoId, PhotoId)> = history
        .iter()
        .filter(|record| record.phase == ContestPhase::Qualifying)
        .map(MatchRecord::pair_key)
        .collect();

    let mut ids: Vec<PhotoId> = eligible.to_vec();
    ids.sort_unstable();
    ids.dedup();

    let rating_of =
        |id: &PhotoId| ratings.get(id).copied().unwrap_or(DEFAULT_RATING);

    let mut best: Option<(i32, (PhotoId, PhotoId))> = None;
    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            let pair = unordered_pair(a, b);
            if fought.contains(&pair) {
                continue;
            }
            let gap = (rating_of(&a) - rating_of(&b)).abs();
            // Strict comparison keeps the lexically-first pair on equal gaps,
            // since iteration runs in ascending id order.
            match best {
                Some((best_gap, _)) if best_gap <= gap => {}
                _ => best = Some((gap, pair)),
            }
        }
    }

    best.map(|(_, pair)| pair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::{BTreeMap, BTreeSet};
    use uuid::Uuid;

    fn id(n: u128) -> PhotoId {
        PhotoId(Uuid::from_u128(n))
    }

    fn record(pair: (PhotoId, PhotoId)) -> MatchRecord {
        MatchRecord {
            a: pair.0,
            b: pair.1,
            winner: pair.0,
            fought_at: Utc::now(),
            winner_delta: 16,
            loser_delta: -16,
            phase: ContestPhase::Qualifying,
        }
    }

    fn flat_ratings(ids: &[PhotoId]) -> BTreeMap<PhotoId, i32> {
        ids.iter().map(|id| (*id, 1500)).collect()
    }

    #[test]
    fn picks_lexically_first_pair_on_equal_gaps() {
        let ids = vec![id(3), id(1), id(2)];
        let ratings = flat_ratings(&ids);
        assert_eq!(next_match(&ids, &ratings, &[]), Some((id(1), id(2))));
    }

    #[test]
    fn prefers_smallest_rating_gap() {
        let ids = vec![id(1), id(2), id(3)];
        let ratings: BTreeMap<PhotoId, i32> =
            [(id(1), 1500), (id(2), 1600), (id(3), 1610)].into_iter().collect();
        assert_eq!(next_match(&ids, &ratings, &[]), Some((id(2), id(3))));
    }

    #[test]
    fn never_repeats_a_pair_and_exhausts_exactly() {
        let ids: Vec<PhotoId> = (1..=4).map(id).collect();
        let mut ratings = flat_ratings(&ids);
        let mut history = Vec::new();
        let mut seen = BTreeSet::new();

        // 4 participants: exactly 6 distinct pairs, then None.
        for _ in 0..6 {
            let pair = next_match(&ids, &ratings, &history)
                .expect("scheduler exhausted early");
            assert!(seen.insert(pair), "pair {:?} repeated", pair);
            // Shift the winner's rating so later gaps differ.
            *ratings.get_mut(&pair.0).unwrap() += 16;
            *ratings.get_mut(&pair.1).unwrap() -= 16;
            history.push(record(pair));
        }
        assert_eq!(next_match(&ids, &ratings, &history), None);
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn members_are_distinct_and_eligible() {
        let ids = vec![id(5), id(9)];
        let ratings = flat_ratings(&ids);
        let (a, b) = next_match(&ids, &ratings, &[]).unwrap();
        assert_ne!(a, b);
        assert!(ids.contains(&a) && ids.contains(&b));
    }

    #[test]
    fn legacy_history_does_not_block_qualifying_pairs() {
        let ids = vec![id(1), id(2)];
        let ratings = flat_ratings(&ids);
        let mut legacy = record((id(1), id(2)));
        legacy.phase = ContestPhase::Final;
        // A final-phase meeting between the pair does not count as fought.
        assert_eq!(
            next_match(&ids, &ratings, &[legacy]),
            Some((id(1), id(2)))
        );
    }

    #[test]
    fn fewer_than_two_eligible_yields_none() {
        assert_eq!(next_match(&[], &BTreeMap::new(), &[]), None);
        assert_eq!(next_match(&[id(1)], &BTreeMap::new(), &[]), None);
    }

    #[test]
    fn duplicate_eligible_ids_are_ignored() {
        let ids = vec![id(1), id(1), id(2)];
        let ratings = flat_ratings(&[id(1), id(2)]);
        assert_eq!(next_match(&ids, &ratings, &[]), Some((id(1), id(2))));
    }
}
