//! PhotoDuel engine
//!
//! Ranks a photo collection through pairwise duels: an Elo rating per photo,
//! a round-robin scheduler that never repeats a pairing, and a bounded 0-100
//! score with a ten-band tier for display. Contest state persists across
//! sessions and reconciles itself against the collection on load.
//!
//! The crate follows a ports-and-adapters layout: `domain` holds the
//! entities and the port traits, `app` the contest state machine and the
//! rating math, `adapters` the filesystem implementations of the ports.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod error;

#[cfg(test)]
pub(crate) mod test_utils;

pub use app::{ContestService, ResolveOutcome};
pub use domain::entities::{
    ContestPhase, ContestState, MatchRecord, MatchSide, Photo, PhotoId, RankingEntry, Tier,
};
pub use error::{ContestError, DomainError};
