//! Append-only due-date history.

use super::{ActionId, HistoryEntryId, ProfileId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A due-date change detected while applying an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDateChange {
    /// Stored due date before the update.
    pub old_due_date: NaiveDate,
    /// Due date after the update.
    pub new_due_date: NaiveDate,
}

/// Immutable audit record of a single due-date change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDateHistoryEntry {
    id: HistoryEntryId,
    action_id: ActionId,
    old_due_date: NaiveDate,
    new_due_date: NaiveDate,
    changed_by: ProfileId,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedHistoryEntryData {
    /// Persisted entry identifier.
    pub id: HistoryEntryId,
    /// Action whose due date changed.
    pub action_id: ActionId,
    /// Previous due date.
    pub old_due_date: NaiveDate,
    /// New due date.
    pub new_due_date: NaiveDate,
    /// Profile that made the change.
    pub changed_by: ProfileId,
    /// Time the change was recorded.
    pub created_at: DateTime<Utc>,
}

impl DueDateHistoryEntry {
    /// Records a due-date change made by `changed_by`.
    #[must_use]
    pub fn record(
        action_id: ActionId,
        change: DueDateChange,
        changed_by: ProfileId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: HistoryEntryId::new(),
            action_id,
            old_due_date: change.old_due_date,
            new_due_date: change.new_due_date,
            changed_by,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedHistoryEntryData) -> Self {
        Self {
            id: data.id,
            action_id: data.action_id,
            old_due_date: data.old_due_date,
            new_due_date: data.new_due_date,
            changed_by: data.changed_by,
            created_at: data.created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> HistoryEntryId {
        self.id
    }

    /// Returns the action identifier.
    #[must_use]
    pub const fn action_id(&self) -> ActionId {
        self.action_id
    }

    /// Returns the due date before the change.
    #[must_use]
    pub const fn old_due_date(&self) -> NaiveDate {
        self.old_due_date
    }

    /// Returns the due date after the change.
    #[must_use]
    pub const fn new_due_date(&self) -> NaiveDate {
        self.new_due_date
    }

    /// Returns the profile that made the change.
    #[must_use]
    pub const fn changed_by(&self) -> ProfileId {
        self.changed_by
    }

    /// Returns the recording timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
