//! Persistent key-value store port
//!
//! Contest state is persisted as an opaque JSON blob under a namespace key.
//! The store does not interpret the blob; schema handling belongs to
//! `app::snapshot`.

use async_trait::async_trait;

use crate::error::DomainError;

/// Namespaced blob persistence.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the blob stored under `namespace`, or `None` if nothing is
    /// stored there.
    async fn load(&self, namespace: &str) -> Result<Option<serde_json::Value>, DomainError>;

    /// Store `blob` under `namespace`, replacing any previous value.
    async fn save(&self, namespace: &str, blob: serde_json::Value) -> Result<(), DomainError>;

    /// Remove whatever is stored under `namespace`. Clearing an empty
    /// namespace is not an error.
    async fn clear(&self, namespace: &str) -> Result<(), DomainError>;
}
