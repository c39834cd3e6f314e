//! Domain ports (traits)
//!
//! Port traits define the interfaces the engine requires from its external
//! collaborators. Adapters provide concrete implementations.

pub mod confirm;
pub mod photo_store;
pub mod state_store;

pub use confirm::ConfirmPrompt;
pub use photo_store::PhotoStore;
pub use state_store::StateStore;
