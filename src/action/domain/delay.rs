//! Delay reasons recorded when an action slips.

use super::{ActionId, DelayReasonId, ParseDelayCategoryError, ProfileId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed categories used to group delay reasons for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayCategory {
    /// Staffing or availability.
    People,
    /// Workflow or approvals.
    Process,
    /// Technical blockers.
    Technical,
    /// Too much work in flight.
    Capacity,
    /// Dependencies outside the team.
    External,
    /// Anything else.
    Other,
}

impl DelayCategory {
    /// All categories in declaration order.
    pub const ALL: [Self; 6] = [
        Self::People,
        Self::Process,
        Self::Technical,
        Self::Capacity,
        Self::External,
        Self::Other,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::People => "people",
            Self::Process => "process",
            Self::Technical => "technical",
            Self::Capacity => "capacity",
            Self::External => "external",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for DelayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DelayCategory {
    type Error = ParseDelayCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ParseDelayCategoryError(value.to_owned()))
    }
}

/// Immutable explanation attached to an action when it moves to delayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayReason {
    id: DelayReasonId,
    action_id: ActionId,
    reason: String,
    category: Option<DelayCategory>,
    created_by: ProfileId,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted delay reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDelayReasonData {
    /// Persisted identifier.
    pub id: DelayReasonId,
    /// Delayed action.
    pub action_id: ActionId,
    /// Free-text explanation.
    pub reason: String,
    /// Optional category.
    pub category: Option<DelayCategory>,
    /// Profile that recorded the reason.
    pub created_by: ProfileId,
    /// Recording timestamp.
    pub created_at: DateTime<Utc>,
}

impl DelayReason {
    /// Records a new delay reason for `action_id`.
    ///
    /// Length rules are enforced by the validation layer before this is
    /// called.
    #[must_use]
    pub fn new(
        action_id: ActionId,
        reason: impl Into<String>,
        category: Option<DelayCategory>,
        created_by: ProfileId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: DelayReasonId::new(),
            action_id,
            reason: reason.into(),
            category,
            created_by,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a delay reason from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedDelayReasonData) -> Self {
        Self {
            id: data.id,
            action_id: data.action_id,
            reason: data.reason,
            category: data.category,
            created_by: data.created_by,
            created_at: data.created_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> DelayReasonId {
        self.id
    }

    /// Returns the delayed action.
    #[must_use]
    pub const fn action_id(&self) -> ActionId {
        self.action_id
    }

    /// Returns the explanation text.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Returns the category, if one was chosen.
    #[must_use]
    pub const fn category(&self) -> Option<DelayCategory> {
        self.category
    }

    /// Returns the profile that recorded the reason.
    #[must_use]
    pub const fn created_by(&self) -> ProfileId {
        self.created_by
    }

    /// Returns the recording timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
