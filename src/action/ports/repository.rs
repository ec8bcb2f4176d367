//! Repository port for actions and their due-date history.

use crate::action::domain::{
    Action, ActionId, ActionQuery, DueDateHistoryEntry, ListedActions, ProfileId, StatusCounts,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for action store operations.
pub type ActionRepositoryResult<T> = Result<T, ActionRepositoryError>;

/// Action persistence contract.
///
/// Row-level access control belongs to the backing store; implementations
/// return whatever the store lets the caller see.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActionRepository: Send + Sync {
    /// Stores a new action.
    ///
    /// # Errors
    ///
    /// Returns [`ActionRepositoryError::DuplicateAction`] when the identifier
    /// already exists.
    async fn store(&self, action: &Action) -> ActionRepositoryResult<()>;

    /// Persists changes to an existing action together with an optional
    /// due-date history entry. Both writes succeed or neither does.
    ///
    /// # Errors
    ///
    /// Returns [`ActionRepositoryError::NotFound`] when the action does not
    /// exist.
    async fn update(
        &self,
        action: &Action,
        history: Option<DueDateHistoryEntry>,
    ) -> ActionRepositoryResult<()>;

    /// Physically removes an action.
    ///
    /// # Errors
    ///
    /// Returns [`ActionRepositoryError::NotFound`] when the action does not
    /// exist.
    async fn delete(&self, id: ActionId) -> ActionRepositoryResult<()>;

    /// Finds an action by identifier.
    ///
    /// Returns `None` when the action does not exist.
    async fn find_by_id(&self, id: ActionId) -> ActionRepositoryResult<Option<Action>>;

    /// Counts the owner's actions that are `on_target` or `delayed`.
    async fn count_active_for_owner(&self, owner: ProfileId) -> ActionRepositoryResult<u64>;

    /// Returns one page of actions matching `query` plus the total match count.
    async fn list(&self, query: &ActionQuery) -> ActionRepositoryResult<ListedActions>;

    /// Counts actions per status, optionally for a single owner.
    async fn count_by_status(
        &self,
        owner: Option<ProfileId>,
    ) -> ActionRepositoryResult<StatusCounts>;

    /// Returns due-date history for an action, newest first.
    async fn due_date_history(
        &self,
        id: ActionId,
    ) -> ActionRepositoryResult<Vec<DueDateHistoryEntry>>;
}

/// Errors returned by action store implementations.
#[derive(Debug, Clone, Error)]
pub enum ActionRepositoryError {
    /// An action with the same identifier already exists.
    #[error("duplicate action identifier: {0}")]
    DuplicateAction(ActionId),

    /// The action was not found.
    #[error("action not found: {0}")]
    NotFound(ActionId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActionRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
