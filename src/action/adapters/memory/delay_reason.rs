//! In-memory delay reason store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::action::{
    domain::{ActionId, DelayReason},
    ports::{ActionRepositoryError, ActionRepositoryResult, DelayReasonRepository},
};

/// Thread-safe append-only delay reason log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDelayReasonRepository {
    reasons: Arc<RwLock<Vec<DelayReason>>>,
}

impl InMemoryDelayReasonRepository {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DelayReasonRepository for InMemoryDelayReasonRepository {
    async fn append(&self, reason: &DelayReason) -> ActionRepositoryResult<()> {
        let mut reasons = self.reasons.write().map_err(|err| {
            ActionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        reasons.push(reason.clone());
        Ok(())
    }

    async fn list_for_action(
        &self,
        action_id: ActionId,
    ) -> ActionRepositoryResult<Vec<DelayReason>> {
        let reasons = self.reasons.read().map_err(|err| {
            ActionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(reasons
            .iter()
            .rev()
            .filter(|reason| reason.action_id() == action_id)
            .cloned()
            .collect())
    }
}
