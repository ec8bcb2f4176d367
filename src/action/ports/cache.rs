//! Cache invalidation contract for read models kept by callers.

use crate::action::domain::ActionId;

/// A cached view affected by action writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Every paginated action listing.
    List,
    /// The detail view of one action.
    Detail(ActionId),
    /// Tab and status counts.
    Counts,
}

impl CacheKey {
    /// Views invalidated by a successful write to `id`.
    #[must_use]
    pub const fn after_write(id: ActionId) -> [Self; 3] {
        [Self::List, Self::Detail(id), Self::Counts]
    }
}

/// Receives invalidations after successful writes.
pub trait CacheInvalidator: Send + Sync {
    /// Marks `keys` stale.
    fn invalidate(&self, keys: &[CacheKey]);
}
