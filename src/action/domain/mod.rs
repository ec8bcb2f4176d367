//! Domain model for the action lifecycle.
//!
//! Actions, their delay reasons and due-date history, the profiles that own
//! them and the listing vocabulary. Nothing here touches storage.

mod action;
mod delay;
mod error;
mod history;
mod ids;
mod listing;
mod profile;
mod status;

pub use action::{
    Action, ActionChanges, AppliedUpdate, NewAction, PersistedActionData, StatusTransition,
};
pub use delay::{DelayCategory, DelayReason, PersistedDelayReasonData};
pub use error::{
    ActionDomainError, ParseActionStatusError, ParseDelayCategoryError, ParseListingError,
    ParseProfileStatusError, ParseUserRoleError,
};
pub use history::{DueDateChange, DueDateHistoryEntry, PersistedHistoryEntryData};
pub use ids::{ActionId, DelayReasonId, HistoryEntryId, ProfileId};
pub use listing::{
    ActionPage, ActionQuery, ActionTab, ListedActions, PageMeta, SortField, SortOrder,
    StatusCounts, TabCounts,
};
pub use profile::{Actor, Capabilities, Profile, ProfileStatus, UserRole};
pub use status::ActionStatus;
