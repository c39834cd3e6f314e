//! Application layer
//!
//! Contest orchestration and the pure rating/scoring/scheduling math it is
//! built from. Services are generic over the domain ports so storage and
//! photo sources stay swappable.

pub mod contest_config;
pub mod contest_service;
pub mod rating;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;

pub use contest_service::{ContestService, ResolveOutcome};
pub use rating::RatingUpdate;
pub use snapshot::Restored;
