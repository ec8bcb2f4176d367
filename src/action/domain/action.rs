//! Action aggregate root and its update rules.

use super::{ActionDomainError, ActionId, ActionStatus, DueDateChange, ProfileId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A trackable work item with an owner, a due date and a status.
///
/// `completed_at` is set exactly when the status is [`ActionStatus::Complete`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    id: ActionId,
    description: String,
    owner_id: ProfileId,
    due_date: NaiveDate,
    status: ActionStatus,
    notes: Option<String>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Validated fields for a brand new action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAction {
    /// What needs doing.
    pub description: String,
    /// Owning profile.
    pub owner_id: ProfileId,
    /// Calendar due date.
    pub due_date: NaiveDate,
    /// Optional free-form notes.
    pub notes: Option<String>,
}

/// Parameter object for reconstructing a persisted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedActionData {
    /// Persisted identifier.
    pub id: ActionId,
    /// Persisted description.
    pub description: String,
    /// Persisted owner.
    pub owner_id: ProfileId,
    /// Persisted due date.
    pub due_date: NaiveDate,
    /// Persisted status.
    pub status: ActionStatus,
    /// Persisted notes.
    pub notes: Option<String>,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Field changes requested by an update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionChanges {
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement due date.
    pub due_date: Option<NaiveDate>,
    /// Replacement notes; `Some(None)` clears them.
    pub notes: Option<Option<String>>,
    /// Target status.
    pub status: Option<ActionStatus>,
    /// Replacement owner.
    pub owner_id: Option<ProfileId>,
}

/// A status change applied to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransition {
    /// Status before the change.
    pub from: ActionStatus,
    /// Status after the change.
    pub to: ActionStatus,
}

/// Side effects produced by [`Action::apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedUpdate {
    /// Set when the due date actually changed.
    pub due_date_change: Option<DueDateChange>,
    /// Set when a status was supplied.
    pub transition: Option<StatusTransition>,
}

impl Action {
    /// Creates a new action with the given initial status.
    #[must_use]
    pub fn new(new_action: NewAction, status: ActionStatus, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let NewAction {
            description,
            owner_id,
            due_date,
            notes,
        } = new_action;

        Self {
            id: ActionId::new(),
            description,
            owner_id,
            due_date,
            status,
            notes,
            completed_at: completion_for(status, timestamp),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an action from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedActionData) -> Self {
        Self {
            id: data.id,
            description: data.description,
            owner_id: data.owner_id,
            due_date: data.due_date,
            status: data.status,
            notes: data.notes,
            completed_at: data.completed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the action identifier.
    #[must_use]
    pub const fn id(&self) -> ActionId {
        self.id
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the owning profile.
    #[must_use]
    pub const fn owner_id(&self) -> ProfileId {
        self.owner_id
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ActionStatus {
        self.status
    }

    /// Returns the notes, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the completion timestamp, set only while complete.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the action to `status`.
    ///
    /// Entering [`ActionStatus::Complete`] stamps `completed_at`, even when
    /// the action was already complete. Any other target clears it.
    pub fn transition_to(&mut self, status: ActionStatus, clock: &impl Clock) -> StatusTransition {
        let timestamp = clock.utc();
        let transition = self.set_status(status, timestamp);
        self.updated_at = timestamp;
        transition
    }

    /// Changes the due date, returning the change when the value differs.
    pub fn reschedule(&mut self, due_date: NaiveDate, clock: &impl Clock) -> Option<DueDateChange> {
        let change = self.set_due_date(due_date)?;
        self.updated_at = clock.utc();
        Some(change)
    }

    /// Applies a batch of field changes under a single timestamp.
    pub fn apply(&mut self, changes: ActionChanges, clock: &impl Clock) -> AppliedUpdate {
        let timestamp = clock.utc();
        let ActionChanges {
            description,
            due_date,
            notes,
            status,
            owner_id,
        } = changes;

        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_notes) = notes {
            self.notes = new_notes;
        }
        if let Some(new_owner) = owner_id {
            self.owner_id = new_owner;
        }
        let due_date_change = due_date.and_then(|date| self.set_due_date(date));
        let transition = status.map(|target| self.set_status(target, timestamp));

        self.updated_at = timestamp;
        AppliedUpdate {
            due_date_change,
            transition,
        }
    }

    /// Checks the deletion guard.
    ///
    /// # Errors
    ///
    /// Returns [`ActionDomainError::CompletedActionNotDeletable`] when the
    /// action is complete.
    pub const fn ensure_deletable(&self) -> Result<(), ActionDomainError> {
        if matches!(self.status, ActionStatus::Complete) {
            return Err(ActionDomainError::CompletedActionNotDeletable(self.id));
        }
        Ok(())
    }

    fn set_status(&mut self, status: ActionStatus, timestamp: DateTime<Utc>) -> StatusTransition {
        let from = self.status;
        self.status = status;
        self.completed_at = completion_for(status, timestamp);
        StatusTransition { from, to: status }
    }

    fn set_due_date(&mut self, due_date: NaiveDate) -> Option<DueDateChange> {
        if self.due_date == due_date {
            return None;
        }
        let change = DueDateChange {
            old_due_date: self.due_date,
            new_due_date: due_date,
        };
        self.due_date = due_date;
        Some(change)
    }
}

const fn completion_for(
    status: ActionStatus,
    timestamp: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match status {
        ActionStatus::Complete => Some(timestamp),
        ActionStatus::OnTarget | ActionStatus::Delayed | ActionStatus::Backlog => None,
    }
}
