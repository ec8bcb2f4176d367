//! Cache invalidators that need no external cache.

use std::sync::{Arc, Mutex};

use crate::action::ports::{CacheInvalidator, CacheKey};

/// Discards every invalidation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCacheInvalidator;

impl CacheInvalidator for NoopCacheInvalidator {
    fn invalidate(&self, _keys: &[CacheKey]) {}
}

/// Records invalidations in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordingCacheInvalidator {
    keys: Arc<Mutex<Vec<CacheKey>>>,
}

impl RecordingCacheInvalidator {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every key invalidated so far.
    #[must_use]
    pub fn recorded(&self) -> Vec<CacheKey> {
        self.keys
            .lock()
            .map(|keys| keys.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl CacheInvalidator for RecordingCacheInvalidator {
    fn invalidate(&self, keys: &[CacheKey]) {
        let mut recorded = self
            .keys
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        recorded.extend_from_slice(keys);
    }
}
