//! Contest state machine
//!
//! `ContestService` owns the transition pipeline of a contest: start,
//! resolve, resume, cancel, restart. All mutation goes through the pure
//! transition functions in this module; the service wraps them with
//! persistence so that no partially-applied step is ever observable across a
//! reload. A resolve call mutates a scratch copy, persists it once, and only
//! then commits it to the caller's state — a failed save leaves the caller's
//! state exactly as it was.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::app::contest_config::{
    CONTEST_ELIGIBLE_RATING, DEFAULT_K_FACTOR, DEFAULT_RATING, MIN_PARTICIPANTS, STATE_NAMESPACE,
};
use crate::app::{rating, scheduler, scoring, snapshot};
use crate::domain::entities::{
    champion_by_rating, recompute_ranks, ContestPhase, ContestState, MatchRecord, MatchSide,
    PhotoId, PhotoStats, RankingRule,
};
use crate::domain::ports::{PhotoStore, StateStore};
use crate::error::ContestError;

/// What a resolve call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The outcome was recorded and a fresh pairing is waiting.
    NextMatch(MatchRecord),
    /// The outcome was recorded and the schedule is exhausted; the contest
    /// is finished.
    Finished(MatchRecord),
    /// No pairing was pending; nothing was recorded, but a match was
    /// (re)scheduled.
    Rescheduled,
}

/// Drives contests over a photo collection and a persistent blob store.
pub struct ContestService<P, S>
where
    P: PhotoStore,
    S: StateStore,
{
    photos: Arc<P>,
    store: Arc<S>,
    namespace: String,
}

impl<P, S> ContestService<P, S>
where
    P: PhotoStore,
    S: StateStore,
{
    pub fn new(photos: Arc<P>, store: Arc<S>) -> Self {
        Self {
            photos,
            store,
            namespace: STATE_NAMESPACE.to_string(),
        }
    }

    /// Override the persistence namespace (one namespace per project).
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Start a fresh contest over the currently eligible photos.
    pub async fn start(&self) -> Result<ContestState, ContestError> {
        let photos = self.photos.list().await?;
        let eligible: Vec<PhotoId> = photos
            .iter()
            .filter(|p| p.rating == Some(CONTEST_ELIGIBLE_RATING))
            .map(|p| p.id)
            .collect();

        if eligible.len() < MIN_PARTICIPANTS {
            return Err(ContestError::InsufficientParticipants {
                found: eligible.len(),
                need: MIN_PARTICIPANTS,
            });
        }

        let mut state = new_contest(eligible, DEFAULT_K_FACTOR);
        ensure_match(&mut state);
        self.persist(&state).await?;

        tracing::info!(
            participants = state.participant_count(),
            total_matches = state.max_qualifying_matches(),
            "contest started"
        );
        Ok(state)
    }

    /// Apply the user's verdict on the pending pairing.
    ///
    /// Called with no pairing pending this does not fail; it schedules a
    /// fresh one and reports [`ResolveOutcome::Rescheduled`].
    pub async fn resolve(
        &self,
        state: &mut ContestState,
        side: MatchSide,
    ) -> Result<ResolveOutcome, ContestError> {
        if state.phase.is_terminal() {
            return Err(ContestError::ContestFinished);
        }

        let mut next = state.clone();
        let outcome = match apply_outcome(&mut next, side, Utc::now()) {
            Some(record) => {
                ensure_match(&mut next);
                if next.phase.is_terminal() {
                    ResolveOutcome::Finished(record)
                } else {
                    ResolveOutcome::NextMatch(record)
                }
            }
            None => {
                tracing::warn!("resolve called with no active match; scheduling a fresh pairing");
                ensure_match(&mut next);
                ResolveOutcome::Rescheduled
            }
        };

        self.persist(&next).await?;
        *state = next;

        if let ResolveOutcome::NextMatch(record) | ResolveOutcome::Finished(record) = &outcome {
            tracing::info!(
                winner = %record.winner,
                loser = %record.loser(),
                winner_delta = record.winner_delta,
                matches = state.history.len(),
                phase = %state.phase,
                "match resolved"
            );
        }
        Ok(outcome)
    }

    /// Load and reconcile the persisted contest, if any.
    ///
    /// Reconciliation repairs are persisted back immediately, and a
    /// non-terminal contest left without a pending pairing gets one lined up
    /// before the state is handed out.
    pub async fn resume(&self) -> Result<Option<ContestState>, ContestError> {
        let Some(blob) = self.store.load(&self.namespace).await? else {
            return Ok(None);
        };
        let photos = self.photos.list().await?;
        let snapshot::Restored {
            mut state,
            mut repaired,
        } = snapshot::restore(blob, &photos)?;

        if !state.phase.is_terminal() && state.pending_match().is_none() {
            ensure_match(&mut state);
            repaired = true;
        }
        if repaired {
            self.persist(&state).await?;
        }

        tracing::info!(
            phase = %state.phase,
            participants = state.participant_count(),
            repaired,
            "contest resumed"
        );
        Ok(Some(state))
    }

    /// Abandon an in-progress contest without finalizing it.
    pub async fn cancel(&self) -> Result<(), ContestError> {
        self.store.clear(&self.namespace).await?;
        tracing::info!("contest cancelled");
        Ok(())
    }

    /// Discard any contest state, finished or not.
    pub async fn restart(&self) -> Result<(), ContestError> {
        self.store.clear(&self.namespace).await?;
        tracing::info!("contest state cleared for restart");
        Ok(())
    }

    async fn persist(&self, state: &ContestState) -> Result<(), ContestError> {
        let blob = snapshot::serialize(state).map_err(ContestError::Persistence)?;
        self.store
            .save(&self.namespace, blob)
            .await
            .map_err(ContestError::Persistence)
    }
}

/// Build the initial state for a fresh qualifying contest.
fn new_contest(eligible_ids: Vec<PhotoId>, k_factor: i32) -> ContestState {
    let mut ids = eligible_ids;
    ids.sort_unstable();
    ids.dedup();

    let ratings: std::collections::BTreeMap<PhotoId, i32> =
        ids.iter().map(|id| (*id, DEFAULT_RATING)).collect();
    let mut stats: std::collections::BTreeMap<PhotoId, PhotoStats> = ids
        .iter()
        .map(|id| (*id, PhotoStats::new(DEFAULT_RATING)))
        .collect();
    recompute_ranks(&mut stats, RankingRule::Standard);

    let rating_range = scoring::rating_range(&ratings);
    let score_tiers = scoring::scores_and_tiers(&ratings, Some(&stats), rating_range, false);

    ContestState {
        phase: ContestPhase::Qualifying,
        eligible_ids: ids,
        ratings,
        history: Vec::new(),
        current_match: None,
        stats,
        score_tiers,
        rating_range,
        frozen: false,
        champion_id: None,
        k_factor,
        legacy_final: None,
    }
}

/// Record the verdict on the pending pairing: rating update (unless frozen),
/// history append, stats bump, rank recompute, pairing cleared. Returns
/// `None` when no pairing is pending.
fn apply_outcome(
    state: &mut ContestState,
    side: MatchSide,
    fought_at: DateTime<Utc>,
) -> Option<MatchRecord> {
    match state.phase {
        ContestPhase::Qualifying => {
            let (a, b) = state.current_match?;
            let (winner, loser) = pick_winner(a, b, side);

            let (winner_delta, loser_delta) = if state.frozen {
                (0, 0)
            } else {
                let (next_ratings, update) =
                    rating::update_map(winner, loser, &state.ratings, state.k_factor);
                state.ratings = next_ratings;
                state.rating_range = scoring::rating_range(&state.ratings);
                state.score_tiers = scoring::scores_and_tiers(
                    &state.ratings,
                    Some(&state.stats),
                    state.rating_range,
                    false,
                );
                (update.winner_delta, update.loser_delta)
            };

            let record = MatchRecord {
                a,
                b,
                winner,
                fought_at,
                winner_delta,
                loser_delta,
                phase: ContestPhase::Qualifying,
            };
            state.history.push(record);
            bump_stats(state, winner, loser);
            recompute_ranks(&mut state.stats, RankingRule::Standard);
            state.current_match = None;
            Some(record)
        }
        ContestPhase::Final => {
            // Legacy round: ratings are frozen, only the record and the
            // win/loss tallies move.
            let (a, b) = state.legacy_final.as_ref()?.current?;
            let (winner, loser) = pick_winner(a, b, side);

            let record = MatchRecord {
                a,
                b,
                winner,
                fought_at,
                winner_delta: 0,
                loser_delta: 0,
                phase: ContestPhase::Final,
            };
            state.history.push(record);
            bump_stats(state, winner, loser);
            recompute_ranks(&mut state.stats, RankingRule::LegacyHybrid);
            state.score_tiers = scoring::scores_and_tiers(
                &state.ratings,
                Some(&state.stats),
                state.rating_range,
                true,
            );
            if let Some(round) = state.legacy_final.as_mut() {
                round.current = None;
            }
            Some(record)
        }
        ContestPhase::Bracket | ContestPhase::Finished => None,
    }
}

fn pick_winner(a: PhotoId, b: PhotoId, side: MatchSide) -> (PhotoId, PhotoId) {
    match side {
        MatchSide::A => (a, b),
        MatchSide::B => (b, a),
    }
}

fn bump_stats(state: &mut ContestState, winner: PhotoId, loser: PhotoId) {
    let winner_rating = state.ratings.get(&winner).copied().unwrap_or(DEFAULT_RATING);
    let loser_rating = state.ratings.get(&loser).copied().unwrap_or(DEFAULT_RATING);

    let entry = state
        .stats
        .entry(winner)
        .or_insert_with(|| PhotoStats::new(winner_rating));
    entry.wins += 1;
    entry.rating = winner_rating;

    let entry = state
        .stats
        .entry(loser)
        .or_insert_with(|| PhotoStats::new(loser_rating));
    entry.losses += 1;
    entry.rating = loser_rating;
}

/// Line up the next pairing, or finalize when the schedule is exhausted.
fn ensure_match(state: &mut ContestState) {
    match state.phase {
        ContestPhase::Qualifying => {
            if state.current_match.is_some() {
                return;
            }
            match scheduler::next_match(&state.eligible_ids, &state.ratings, &state.history) {
                Some(pair) => state.current_match = Some(pair),
                None => finalize(state),
            }
        }
        ContestPhase::Final => {
            let Some(round) = state.legacy_final.as_mut() else {
                finalize(state);
                return;
            };
            if round.current.is_some() {
                return;
            }
            if round.remaining.is_empty() {
                finalize(state);
            } else {
                round.current = Some(round.remaining.remove(0));
            }
        }
        ContestPhase::Bracket => finalize(state),
        ContestPhase::Finished => {}
    }
}

/// Terminal transition: crown the champion and close the contest. Ranks are
/// left as the last resolve computed them.
fn finalize(state: &mut ContestState) {
    state.champion_id = champion_by_rating(&state.ratings);
    state.phase = ContestPhase::Finished;
    state.current_match = None;
    state.legacy_final = None;
    state.frozen = false;
    tracing::info!(
        champion = ?state.champion_id.map(|id| id.to_string()),
        matches = state.history.len(),
        "contest finished"
    );
}
