//! Repository port for delay reasons.

use super::ActionRepositoryResult;
use crate::action::domain::{ActionId, DelayReason};
use async_trait::async_trait;

/// Append-only delay reason store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DelayReasonRepository: Send + Sync {
    /// Appends a delay reason.
    ///
    /// # Errors
    ///
    /// Returns [`super::ActionRepositoryError::Persistence`] when the store
    /// rejects the insert.
    async fn append(&self, reason: &DelayReason) -> ActionRepositoryResult<()>;

    /// Returns every delay reason recorded for an action, newest first.
    async fn list_for_action(&self, action_id: ActionId)
    -> ActionRepositoryResult<Vec<DelayReason>>;
}
