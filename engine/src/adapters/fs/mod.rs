//! Filesystem adapters

pub mod photo_store;
pub mod state_store;

pub use photo_store::JsonPhotoStore;
pub use state_store::FsStateStore;
