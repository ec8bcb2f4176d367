//! Fixed identity provider for tests and single-user embedding.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::action::{
    domain::Actor,
    ports::{IdentityError, IdentityProvider},
};

/// Identity provider returning whichever actor was last signed in.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    actor: Arc<RwLock<Option<Actor>>>,
}

impl StaticIdentity {
    /// Creates a provider with `actor` signed in.
    #[must_use]
    pub fn signed_in(actor: Actor) -> Self {
        Self {
            actor: Arc::new(RwLock::new(Some(actor))),
        }
    }

    /// Creates a provider with nobody signed in.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Replaces the current actor.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when the lock is poisoned.
    pub fn set_actor(&self, actor: Option<Actor>) -> Result<(), IdentityError> {
        let mut current = self
            .actor
            .write()
            .map_err(|err| IdentityError::new(std::io::Error::other(err.to_string())))?;
        *current = actor;
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_actor(&self) -> Result<Option<Actor>, IdentityError> {
        let current = self
            .actor
            .read()
            .map_err(|err| IdentityError::new(std::io::Error::other(err.to_string())))?;
        Ok(*current)
    }
}
