//! Confirmation prompt port
//!
//! Destructive actions (restarting a contest, discarding progress) go
//! through a yes/no decision that resolves asynchronously. The prompt is
//! awaited by the caller driving the engine, never inside a state
//! transition.

use async_trait::async_trait;

/// Asynchronous yes/no decision presented to the user.
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    /// Present the question and resolve to the user's decision.
    async fn confirm(&self, title: &str, message: &str) -> bool;
}
