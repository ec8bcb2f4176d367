//! Team member profiles, the request actor and its capabilities.

use super::{ParseProfileStatusError, ParseUserRoleError, ProfileId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role assigned to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular team member; sees and manages their own actions.
    TeamMember,
    /// Project manager; sees every action and may assign owners.
    Pm,
}

impl UserRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TeamMember => "team_member",
            Self::Pm => "pm",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UserRole {
    type Error = ParseUserRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "team_member" => Ok(Self::TeamMember),
            "pm" => Ok(Self::Pm),
            _ => Err(ParseUserRoleError(value.to_owned())),
        }
    }
}

/// Account status of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    /// Can sign in and own actions.
    Active,
    /// Invited but not yet onboarded.
    Pending,
    /// Access revoked.
    Deactivated,
}

impl ProfileStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Deactivated => "deactivated",
        }
    }
}

impl fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProfileStatus {
    type Error = ParseProfileStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "pending" => Ok(Self::Pending),
            "deactivated" => Ok(Self::Deactivated),
            _ => Err(ParseProfileStatusError(value.to_owned())),
        }
    }
}

/// A user profile that can own actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile identifier, shared with the authentication user id.
    pub id: ProfileId,
    /// Sign-in email address.
    pub email: String,
    /// Display name, if set.
    pub full_name: Option<String>,
    /// Assigned role.
    pub role: UserRole,
    /// Account status.
    pub status: ProfileStatus,
}

impl Profile {
    /// Creates an active profile.
    #[must_use]
    pub fn new(id: ProfileId, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id,
            email: email.into(),
            full_name: None,
            role,
            status: ProfileStatus::Active,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Sets the account status.
    #[must_use]
    pub const fn with_status(mut self, status: ProfileStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns `true` when the profile may own actions.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, ProfileStatus::Active)
    }
}

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Actor {
    user_id: ProfileId,
    role: UserRole,
}

impl Actor {
    /// Creates an actor.
    #[must_use]
    pub const fn new(user_id: ProfileId, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// Creates a team member actor.
    #[must_use]
    pub const fn team_member(user_id: ProfileId) -> Self {
        Self::new(user_id, UserRole::TeamMember)
    }

    /// Creates a project manager actor.
    #[must_use]
    pub const fn pm(user_id: ProfileId) -> Self {
        Self::new(user_id, UserRole::Pm)
    }

    /// Returns the caller's profile id.
    #[must_use]
    pub const fn user_id(&self) -> ProfileId {
        self.user_id
    }

    /// Returns the caller's role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Derives the capability set for this request.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        let is_pm = matches!(self.role, UserRole::Pm);
        Capabilities {
            can_assign_owner: is_pm,
            can_view_all: is_pm,
        }
    }
}

/// What the caller may do, derived once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    /// May create or reassign actions for other profiles.
    pub can_assign_owner: bool,
    /// May list actions owned by anyone.
    pub can_view_all: bool,
}
