//! Contest tuning constants
//!
//! Every default the engine consumes lives here; nothing else hardcodes a
//! starting rating or a weight.

/// Rating every participant starts a contest with, and the fallback wherever
/// a rating is missing.
pub const DEFAULT_RATING: i32 = 1500;

/// Maximum rating points exchanged per match.
pub const DEFAULT_K_FACTOR: i32 = 32;

/// Logistic scale of the expected-score curve.
pub const ELO_SCALE: f64 = 400.0;

/// Star rating a photo must carry to enter a contest.
pub const CONTEST_ELIGIBLE_RATING: u8 = 5;

/// A duel needs two sides.
pub const MIN_PARTICIPANTS: usize = 2;

/// Score reported when ratings carry no information yet (empty range, no
/// games played).
pub const MIDPOINT_SCORE: i32 = 50;

/// Weight of the normalized Elo score in the legacy hybrid blend.
pub const ELO_WEIGHT: f64 = 0.3;

/// Weight of the win/loss ratio in the legacy hybrid blend.
pub const WIN_LOSS_WEIGHT: f64 = 0.7;

/// Namespace the contest blob is persisted under.
pub const STATE_NAMESPACE: &str = "photoduel.contest";
