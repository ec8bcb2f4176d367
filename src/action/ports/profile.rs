//! Read-only port for team member profiles.

use super::ActionRepositoryResult;
use crate::action::domain::{Profile, ProfileId};
use async_trait::async_trait;

/// Profile lookups used for owner assignment.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds a profile by identifier.
    async fn find_by_id(&self, id: ProfileId) -> ActionRepositoryResult<Option<Profile>>;

    /// Returns active profiles ordered by display name, then email.
    async fn list_active(&self) -> ActionRepositoryResult<Vec<Profile>>;
}
