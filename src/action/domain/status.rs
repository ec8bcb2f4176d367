//! Action lifecycle status.

use super::ParseActionStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an action.
///
/// Every status may move to every other status. `OnTarget` and `Delayed`
/// count towards the owner's work-in-progress limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    /// Work is progressing towards the due date.
    OnTarget,
    /// Work has slipped; a delay reason may be attached.
    Delayed,
    /// Work is finished.
    Complete,
    /// Parked outside active tracking.
    Backlog,
}

impl ActionStatus {
    /// All statuses in declaration order.
    pub const ALL: [Self; 4] = [Self::OnTarget, Self::Delayed, Self::Complete, Self::Backlog];

    /// Statuses counted towards the work-in-progress limit.
    pub const ACTIVE: [Self; 2] = [Self::OnTarget, Self::Delayed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnTarget => "on_target",
            Self::Delayed => "delayed",
            Self::Complete => "complete",
            Self::Backlog => "backlog",
        }
    }

    /// Returns `true` when the status counts towards the WIP limit.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::OnTarget | Self::Delayed)
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ActionStatus {
    type Error = ParseActionStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "on_target" => Ok(Self::OnTarget),
            "delayed" => Ok(Self::Delayed),
            "complete" => Ok(Self::Complete),
            "backlog" => Ok(Self::Backlog),
            _ => Err(ParseActionStatusError(value.to_owned())),
        }
    }
}
