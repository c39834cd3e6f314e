//! Shared test doubles and fixtures.
//!
//! Hand-rolled in-memory port implementations; the ports are small enough
//! that a mocking framework would be more code than these.

mod fixtures;
mod mocks;

pub use fixtures::{test_photo, test_photo_with_rating};
pub use mocks::{AutoConfirm, InMemoryPhotoStore, InMemoryStateStore};
