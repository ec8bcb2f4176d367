//! Port contracts for the action lifecycle.
//!
//! Ports define infrastructure-agnostic interfaces used by action services.

pub mod cache;
pub mod delay_reason;
pub mod identity;
pub mod profile;
pub mod repository;

pub use cache::{CacheInvalidator, CacheKey};
pub use delay_reason::DelayReasonRepository;
pub use identity::{IdentityError, IdentityProvider};
pub use profile::ProfileRepository;
pub use repository::{ActionRepository, ActionRepositoryError, ActionRepositoryResult};

#[cfg(test)]
pub use delay_reason::MockDelayReasonRepository;
#[cfg(test)]
pub use repository::MockActionRepository;
