//! Error types for the PhotoDuel engine
//!
//! Two layers, mirroring the port/service split:
//! - `DomainError`: failures reported by port implementations (stores, prompts)
//! - `ContestError`: contest-level failures surfaced by the engine API

use thiserror::Error;

/// Errors reported by port implementations.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Serialization(e.to_string())
    }
}

/// Contest-level errors surfaced by the engine API.
///
/// A resolve call with no pending match is not represented here: the engine
/// recovers by scheduling a fresh pairing instead of failing. Schedule
/// exhaustion is likewise not an error; it finalizes the contest.
#[derive(Debug, Error)]
pub enum ContestError {
    #[error("Not enough eligible photos to start a contest (found {found}, need {need})")]
    InsufficientParticipants { found: usize, need: usize },

    /// Saving contest state failed. The in-memory state the caller holds is
    /// left exactly as it was before the operation.
    #[error("Contest state could not be saved: {0}")]
    Persistence(#[source] DomainError),

    #[error("Contest is already finished")]
    ContestFinished,

    #[error("{0}")]
    Domain(#[from] DomainError),
}
