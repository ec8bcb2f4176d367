//! In-memory profile directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::action::{
    domain::{Profile, ProfileId},
    ports::{ActionRepositoryError, ActionRepositoryResult, ProfileRepository},
};

/// Thread-safe profile directory seeded by the embedding application.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<ProfileId, Profile>>>,
}

impl InMemoryProfileRepository {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a profile.
    ///
    /// # Errors
    ///
    /// Returns [`ActionRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn insert(&self, profile: Profile) -> ActionRepositoryResult<()> {
        let mut profiles = self.profiles.write().map_err(|err| {
            ActionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        profiles.insert(profile.id, profile);
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_id(&self, id: ProfileId) -> ActionRepositoryResult<Option<Profile>> {
        let profiles = self.profiles.read().map_err(|err| {
            ActionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(profiles.get(&id).cloned())
    }

    async fn list_active(&self) -> ActionRepositoryResult<Vec<Profile>> {
        let profiles = self.profiles.read().map_err(|err| {
            ActionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut active: Vec<Profile> = profiles
            .values()
            .filter(|profile| profile.is_active())
            .cloned()
            .collect();
        // Unnamed profiles sort last, as with `ORDER BY full_name ASC`.
        active.sort_by(|left, right| {
            (left.full_name.is_none(), &left.full_name, &left.email).cmp(&(
                right.full_name.is_none(),
                &right.full_name,
                &right.email,
            ))
        });
        Ok(active)
    }
}
