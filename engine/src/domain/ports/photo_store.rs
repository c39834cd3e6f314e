//! Photo store port
//!
//! The photo collection lives outside the engine (library files, an app
//! database, ...). The engine only ever reads it.

use async_trait::async_trait;

use crate::domain::entities::Photo;
use crate::error::DomainError;

/// Read-only access to the user's photo collection.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// List the current photo collection. Soft-deleted photos must not be
    /// included; anything returned here is a valid reconciliation target.
    async fn list(&self) -> Result<Vec<Photo>, DomainError>;
}
