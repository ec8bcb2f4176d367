//! In-memory adapters for the action lifecycle.

mod action;
mod cache;
mod delay_reason;
mod identity;
mod profile;

pub use action::InMemoryActionRepository;
pub use cache::{NoopCacheInvalidator, RecordingCacheInvalidator};
pub use delay_reason::InMemoryDelayReasonRepository;
pub use identity::StaticIdentity;
pub use profile::InMemoryProfileRepository;
