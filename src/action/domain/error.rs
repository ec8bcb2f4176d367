//! Error types for action domain rules and parsing.

use super::{ActionId, ProfileId};
use thiserror::Error;

/// Business rule violations raised by the action aggregate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionDomainError {
    /// Completed actions are kept for reporting and cannot be removed.
    #[error("cannot delete completed action {0}")]
    CompletedActionNotDeletable(ActionId),

    /// Only project managers may set an owner other than themselves.
    #[error("profile {actor} is not permitted to assign action ownership")]
    OwnerAssignmentNotPermitted {
        /// The caller attempting the assignment.
        actor: ProfileId,
    },

    /// The requested owner has no active profile.
    #[error("profile {0} is not an active team member")]
    InactiveOwner(ProfileId),
}

/// Error returned while parsing action statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown action status: {0}")]
pub struct ParseActionStatusError(pub String);

/// Error returned while parsing delay categories.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown delay category: {0}")]
pub struct ParseDelayCategoryError(pub String);

/// Error returned while parsing user roles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user role: {0}")]
pub struct ParseUserRoleError(pub String);

/// Error returned while parsing profile statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown profile status: {0}")]
pub struct ParseProfileStatusError(pub String);

/// Error returned while parsing list query enumerations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseListingError {
    /// Which enumeration failed to parse.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}
