//! Port for the authentication collaborator.

use crate::action::domain::Actor;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Resolves the caller of the current request.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the authenticated actor, or `None` when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when the authentication backend fails.
    async fn current_actor(&self) -> Result<Option<Actor>, IdentityError>;
}

/// Failure reported by the authentication backend.
#[derive(Debug, Clone, Error)]
#[error("identity lookup failed: {0}")]
pub struct IdentityError(pub Arc<dyn std::error::Error + Send + Sync>);

impl IdentityError {
    /// Wraps a backend error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
