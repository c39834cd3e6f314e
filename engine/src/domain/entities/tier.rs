//! Score tiers
//!
//! A normalized 0-100 score maps to exactly one of ten contiguous bands.
//! The bands jointly cover [0, 100] with no gaps or overlaps; the top band
//! absorbs the extra point at 100.

use serde::{Deserialize, Serialize};

/// Display tier for a normalized score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Discard,
    Weak,
    Filler,
    Decent,
    Solid,
    Good,
    Strong,
    Excellent,
    Outstanding,
    Masterpiece,
}

impl Tier {
    /// All tiers in ascending band order.
    pub const ALL: [Tier; 10] = [
        Tier::Discard,
        Tier::Weak,
        Tier::Filler,
        Tier::Decent,
        Tier::Solid,
        Tier::Good,
        Tier::Strong,
        Tier::Excellent,
        Tier::Outstanding,
        Tier::Masterpiece,
    ];

    /// Get the tier for a normalized score. Total over all inputs: scores
    /// outside [0, 100] are clamped first.
    pub fn for_score(score: i32) -> Self {
        match score.clamp(0, 100) {
            ..=9 => Tier::Discard,
            10..=19 => Tier::Weak,
            20..=29 => Tier::Filler,
            30..=39 => Tier::Decent,
            40..=49 => Tier::Solid,
            50..=59 => Tier::Good,
            60..=69 => Tier::Strong,
            70..=79 => Tier::Excellent,
            80..=89 => Tier::Outstanding,
            _ => Tier::Masterpiece,
        }
    }

    /// Inclusive score band covered by this tier.
    pub fn band(&self) -> (i32, i32) {
        match self {
            Tier::Discard => (0, 9),
            Tier::Weak => (10, 19),
            Tier::Filler => (20, 29),
            Tier::Decent => (30, 39),
            Tier::Solid => (40, 49),
            Tier::Good => (50, 59),
            Tier::Strong => (60, 69),
            Tier::Excellent => (70, 79),
            Tier::Outstanding => (80, 89),
            Tier::Masterpiece => (90, 100),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Discard => "Discard Pile",
            Tier::Weak => "Weak",
            Tier::Filler => "Filler",
            Tier::Decent => "Decent",
            Tier::Solid => "Solid",
            Tier::Good => "Good",
            Tier::Strong => "Strong",
            Tier::Excellent => "Excellent",
            Tier::Outstanding => "Outstanding",
            Tier::Masterpiece => "Masterpiece",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tier::Discard => "🗑️",
            Tier::Weak => "😕",
            Tier::Filler => "📦",
            Tier::Decent => "🙂",
            Tier::Solid => "👍",
            Tier::Good => "✨",
            Tier::Strong => "💪",
            Tier::Excellent => "🌟",
            Tier::Outstanding => "🏆",
            Tier::Masterpiece => "👑",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Derived display score for a photo: normalized score, tier, raw rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTier {
    pub score: i32,
    pub tier: Tier,
    pub rating: i32,
}
