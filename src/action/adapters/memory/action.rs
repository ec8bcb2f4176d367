//! In-memory action store for tests and embedding.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::action::{
    domain::{
        Action, ActionId, ActionQuery, DueDateHistoryEntry, ListedActions, ProfileId, SortField,
        SortOrder, StatusCounts,
    },
    ports::{ActionRepository, ActionRepositoryError, ActionRepositoryResult},
};

/// Thread-safe in-memory action repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActionRepository {
    state: Arc<RwLock<InMemoryActionState>>,
}

#[derive(Debug, Default)]
struct InMemoryActionState {
    actions: HashMap<ActionId, Action>,
    history: Vec<DueDateHistoryEntry>,
}

impl InMemoryActionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ActionRepositoryResult<RwLockReadGuard<'_, InMemoryActionState>> {
        self.state.read().map_err(|err| {
            ActionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> ActionRepositoryResult<RwLockWriteGuard<'_, InMemoryActionState>> {
        self.state.write().map_err(|err| {
            ActionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Orders two actions the way the `PostgreSQL` adapter does: by the sort
/// column, then by id ascending.
fn compare(left: &Action, right: &Action, sort_by: SortField, order: SortOrder) -> Ordering {
    let primary = match sort_by {
        SortField::DueDate => left.due_date().cmp(&right.due_date()),
        SortField::CreatedAt => left.created_at().cmp(&right.created_at()),
        SortField::Status => left.status().as_str().cmp(right.status().as_str()),
    };
    let directed = match order {
        SortOrder::Asc => primary,
        SortOrder::Desc => primary.reverse(),
    };
    directed.then_with(|| left.id().cmp(&right.id()))
}

#[async_trait]
impl ActionRepository for InMemoryActionRepository {
    async fn store(&self, action: &Action) -> ActionRepositoryResult<()> {
        let mut state = self.write()?;
        if state.actions.contains_key(&action.id()) {
            return Err(ActionRepositoryError::DuplicateAction(action.id()));
        }
        state.actions.insert(action.id(), action.clone());
        Ok(())
    }

    async fn update(
        &self,
        action: &Action,
        history: Option<DueDateHistoryEntry>,
    ) -> ActionRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.actions.contains_key(&action.id()) {
            return Err(ActionRepositoryError::NotFound(action.id()));
        }
        state.actions.insert(action.id(), action.clone());
        if let Some(entry) = history {
            state.history.push(entry);
        }
        Ok(())
    }

    async fn delete(&self, id: ActionId) -> ActionRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .actions
            .remove(&id)
            .map(|_| ())
            .ok_or(ActionRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: ActionId) -> ActionRepositoryResult<Option<Action>> {
        let state = self.read()?;
        Ok(state.actions.get(&id).cloned())
    }

    async fn count_active_for_owner(&self, owner: ProfileId) -> ActionRepositoryResult<u64> {
        let state = self.read()?;
        let count = state
            .actions
            .values()
            .filter(|action| action.owner_id() == owner && action.status().is_active())
            .count();
        u64::try_from(count).map_err(ActionRepositoryError::persistence)
    }

    async fn list(&self, query: &ActionQuery) -> ActionRepositoryResult<ListedActions> {
        let state = self.read()?;
        let mut matching: Vec<&Action> = state
            .actions
            .values()
            .filter(|action| query.matches(action))
            .collect();
        matching.sort_by(|left, right| compare(left, right, query.sort_by(), query.sort_order()));

        let total = u64::try_from(matching.len()).map_err(ActionRepositoryError::persistence)?;
        let offset = usize::try_from(query.offset()).map_err(ActionRepositoryError::persistence)?;
        let limit = usize::try_from(query.limit()).map_err(ActionRepositoryError::persistence)?;
        let items = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(ListedActions { items, total })
    }

    async fn count_by_status(
        &self,
        owner: Option<ProfileId>,
    ) -> ActionRepositoryResult<StatusCounts> {
        let state = self.read()?;
        let mut counts = StatusCounts::default();
        state
            .actions
            .values()
            .filter(|action| owner.is_none_or(|id| id == action.owner_id()))
            .for_each(|action| counts.add(action.status(), 1));
        Ok(counts)
    }

    async fn due_date_history(
        &self,
        id: ActionId,
    ) -> ActionRepositoryResult<Vec<DueDateHistoryEntry>> {
        let state = self.read()?;
        Ok(state
            .history
            .iter()
            .rev()
            .filter(|entry| entry.action_id() == id)
            .cloned()
            .collect())
    }
}
