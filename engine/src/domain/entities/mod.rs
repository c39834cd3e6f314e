//! Domain entities
//!
//! Pure domain models representing core business concepts. The contest state
//! machine and the scoring math that mutate these live in the `app` layer.

pub mod contest;
pub mod photo;
pub mod stats;
pub mod tier;

pub use contest::{
    champion_by_rating, unordered_pair, ContestPhase, ContestState, LegacyFinalRound, MatchRecord,
    MatchSide,
};
pub use photo::{Photo, PhotoId};
pub use stats::{recompute_ranks, PhotoStats, RankingEntry, RankingRule, RatingRange};
pub use tier::{ScoreTier, Tier};
