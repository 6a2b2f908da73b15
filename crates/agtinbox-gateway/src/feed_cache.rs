//! Process-wide cache of the resolved, sorted feed.
//!
//! Keyed by the `(comments, ratings, owners)` version triple reported by the
//! collaborators. Any version change invalidates the entry. Unversioned
//! snapshots bypass the cache entirely.

use std::sync::{Arc, Mutex, PoisonError};

use agtinbox_core::types::CanonicalEvent;
use tracing::trace;

pub type VersionKey = (u64, u64, u64);

#[derive(Debug)]
struct CachedFeed {
    key: VersionKey,
    events: Arc<[CanonicalEvent]>,
}

#[derive(Debug, Default)]
pub struct FeedCache {
    slot: Mutex<Option<CachedFeed>>,
}

impl FeedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached feed for `key`, building (and storing) it on a miss.
    ///
    /// `build` runs without the lock held; concurrent misses may both build,
    /// and the last writer wins. Both results are equal for the same key.
    pub fn get_or_build(
        &self,
        key: Option<VersionKey>,
        build: impl FnOnce() -> Vec<CanonicalEvent>,
    ) -> Arc<[CanonicalEvent]> {
        let Some(key) = key else {
            return build().into();
        };

        if let Some(hit) = self.lookup(key) {
            trace!(?key, "feed cache hit");
            return hit;
        }

        trace!(?key, "feed cache miss");
        let events: Arc<[CanonicalEvent]> = build().into();
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(CachedFeed {
            key,
            events: Arc::clone(&events),
        });
        events
    }

    fn lookup(&self, key: VersionKey) -> Option<Arc<[CanonicalEvent]>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|c| c.key == key)
            .map(|c| Arc::clone(&c.events))
    }
}
