//! Event aggregation: runs every source adapter and the recipient resolver
//! over a snapshot and produces one deduplicated, totally-ordered feed.
//!
//! Order is `(occurred_at, id)` ascending everywhere. Sources are never
//! assumed to be pre-sorted; every build performs a full sort.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use agtinbox_core::collections::Sources;
use agtinbox_core::types::CanonicalEvent;
use agtinbox_source_comments::{adapter as comment_adapter, translate as comment_translate};
use agtinbox_source_ratings::{adapter as rating_adapter, translate as rating_translate};
use tracing::trace;

use crate::config::EngineConfig;
use crate::feed_cache::FeedCache;
use crate::resolver::RecipientResolver;

/// Build the complete feed (all recipients) from a snapshot.
pub fn build_feed(sources: &Sources<'_>, config: &EngineConfig) -> Vec<CanonicalEvent> {
    let comments = comment_adapter::visible_comments(sources.comments.read_all());
    let ratings = rating_adapter::valid_ratings(sources.ratings.read_all());
    let resolver = RecipientResolver::new(&comments, sources.owners, config);

    let routed_comments = comments.iter().filter_map(|c| {
        resolver
            .resolve_comment(c)
            .map(|recipient| comment_translate::translate(c, &recipient))
    });
    let routed_ratings = ratings.iter().filter_map(|r| {
        resolver
            .resolve_rating(r)
            .map(|recipient| rating_translate::translate(r, &recipient))
    });

    let feed = dedupe_and_sort(routed_comments.chain(routed_ratings));
    trace!(
        comments = comments.len(),
        ratings = ratings.len(),
        events = feed.len(),
        "built feed"
    );
    feed
}

/// Collapse events sharing `(recipient, id)`, keeping the latest by feed
/// order, then sort ascending.
fn dedupe_and_sort(events: impl Iterator<Item = CanonicalEvent>) -> Vec<CanonicalEvent> {
    let mut unique: HashMap<(String, String), CanonicalEvent> = HashMap::new();
    for event in events {
        match unique.entry((event.recipient_handle.clone(), event.id.clone())) {
            Entry::Occupied(mut slot) => {
                if event.cmp_feed_order(slot.get()).is_gt() {
                    slot.insert(event);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(event);
            }
        }
    }
    let mut feed: Vec<CanonicalEvent> = unique.into_values().collect();
    feed.sort_by(CanonicalEvent::cmp_feed_order);
    feed
}

/// Stateless apart from the optional version-keyed [`FeedCache`].
#[derive(Debug, Default)]
pub struct Aggregator {
    config: EngineConfig,
    cache: FeedCache,
}

impl Aggregator {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cache: FeedCache::new(),
        }
    }

    /// Whole feed, all recipients, ascending.
    pub fn feed(&self, sources: &Sources<'_>) -> Arc<[CanonicalEvent]> {
        self.cache
            .get_or_build(sources.version_key(), || build_feed(sources, &self.config))
    }

    /// Every event addressed to `recipient`, ascending.
    pub fn events_for(&self, sources: &Sources<'_>, recipient: &str) -> Vec<CanonicalEvent> {
        self.feed(sources)
            .iter()
            .filter(|e| e.recipient_handle == recipient)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissingParentPolicy;
    use agtinbox_core::collections::{MemoryCollection, MemoryOwners};
    use serde_json::json;

    fn comment(id: &str, author: &str, parent: Option<&str>, at: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "artifact_id": "art_1",
            "parent_id": parent,
            "kind": "comment",
            "body_md": "text",
            "author": {"handle": author},
            "status": status,
            "created_at": at
        })
    }

    fn rating(id: &str, rater: &str, created: &str, updated: &str) -> serde_json::Value {
        json!({
            "id": id,
            "artifact_id": "art_1",
            "rater": {"handle": rater},
            "score": 4,
            "created_at": created,
            "updated_at": updated
        })
    }

    fn owners() -> MemoryOwners {
        MemoryOwners::new([("art_1".to_owned(), "alice".to_owned())].into_iter().collect())
    }

    fn ids(events: &[CanonicalEvent]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn interleaves_sources_by_occurred_at() {
        let comments = MemoryCollection::new(vec![
            comment("c2", "dana", None, "2026-03-01T09:03:00Z", "visible"),
            comment("c1", "bob", None, "2026-03-01T09:01:00Z", "visible"),
        ]);
        let ratings = MemoryCollection::new(vec![rating(
            "r1",
            "bob",
            "2026-03-01T09:02:00Z",
            "2026-03-01T09:02:00Z",
        )]);
        let owners = owners();
        let agg = Aggregator::default();
        let events = agg.events_for(&Sources::new(&comments, &ratings, &owners), "alice");
        assert_eq!(ids(&events), vec!["comment:c1", "rating:r1", "comment:c2"]);
    }

    #[test]
    fn ties_break_by_id() {
        let t = "2026-03-01T09:00:00Z";
        let comments = MemoryCollection::new(vec![
            comment("b", "bob", None, t, "visible"),
            comment("a", "bob", None, t, "visible"),
        ]);
        let ratings = MemoryCollection::new(vec![rating("a", "bob", t, t)]);
        let owners = owners();
        let agg = Aggregator::default();
        let events = agg.events_for(&Sources::new(&comments, &ratings, &owners), "alice");
        assert_eq!(ids(&events), vec!["comment:a", "comment:b", "rating:a"]);
    }

    #[test]
    fn hidden_and_deleted_never_aggregate() {
        let comments = MemoryCollection::new(vec![
            comment("c1", "bob", None, "2026-03-01T09:01:00Z", "hidden"),
            comment("c2", "bob", None, "2026-03-01T09:02:00Z", "deleted"),
            comment("c3", "bob", None, "2026-03-01T09:03:00Z", "visible"),
        ]);
        let ratings = MemoryCollection::default();
        let owners = owners();
        let agg = Aggregator::default();
        let feed = agg.feed(&Sources::new(&comments, &ratings, &owners));
        assert_eq!(ids(&feed), vec!["comment:c3"]);
    }

    #[test]
    fn duplicate_raw_ids_collapse_to_latest() {
        let ratings = MemoryCollection::new(vec![
            rating("r1", "bob", "2026-03-01T09:00:00Z", "2026-03-01T09:00:00Z"),
            rating("r1", "bob", "2026-03-01T09:00:00Z", "2026-03-01T09:05:00Z"),
        ]);
        let comments = MemoryCollection::default();
        let owners = owners();
        let agg = Aggregator::default();
        let events = agg.events_for(&Sources::new(&comments, &ratings, &owners), "alice");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type.as_str(), "rating.updated");
    }

    #[test]
    fn filters_to_recipient() {
        let comments = MemoryCollection::new(vec![
            comment("c1", "bob", None, "2026-03-01T09:01:00Z", "visible"),
            comment("c2", "charlie", Some("c1"), "2026-03-01T09:02:00Z", "visible"),
        ]);
        let ratings = MemoryCollection::default();
        let owners = owners();
        let agg = Aggregator::default();
        let sources = Sources::new(&comments, &ratings, &owners);
        assert_eq!(ids(&agg.events_for(&sources, "alice")), vec!["comment:c1"]);
        assert_eq!(ids(&agg.events_for(&sources, "bob")), vec!["comment:c2"]);
        assert!(agg.events_for(&sources, "charlie").is_empty());
    }

    fn thread_under_parent(status: &str) -> MemoryCollection {
        MemoryCollection::new(vec![
            comment("c1", "bob", None, "2026-03-01T09:01:00Z", status),
            comment("c2", "charlie", Some("c1"), "2026-03-01T09:02:00Z", "visible"),
        ])
    }

    #[test]
    fn reply_to_non_visible_parent_falls_back_to_owner() {
        for status in ["deleted", "hidden"] {
            let comments = thread_under_parent(status);
            let ratings = MemoryCollection::default();
            let owners = owners();
            let agg = Aggregator::default();
            let sources = Sources::new(&comments, &ratings, &owners);

            let alice = agg.events_for(&sources, "alice");
            assert_eq!(ids(&alice), vec!["comment:c2"], "parent {status}");
            assert_eq!(alice[0].event_type.as_str(), "comment.replied");
            assert!(agg.events_for(&sources, "bob").is_empty(), "parent {status}");
        }
    }

    #[test]
    fn reply_to_non_visible_parent_dropped_under_drop_policy() {
        for status in ["deleted", "hidden"] {
            let comments = thread_under_parent(status);
            let ratings = MemoryCollection::default();
            let owners = owners();
            let agg = Aggregator::new(EngineConfig {
                missing_parent: MissingParentPolicy::Drop,
                ..EngineConfig::default()
            });

            let feed = agg.feed(&Sources::new(&comments, &ratings, &owners));
            assert!(feed.is_empty(), "parent {status}: {:?}", ids(&feed));
        }
    }

    #[test]
    fn versioned_sources_reuse_cached_feed() {
        let mut comments = MemoryCollection::with_version(
            vec![comment("c1", "bob", None, "2026-03-01T09:01:00Z", "visible")],
            1,
        );
        let ratings = MemoryCollection::with_version(vec![], 1);
        let owners = MemoryOwners::with_version(
            [("art_1".to_owned(), "alice".to_owned())].into_iter().collect(),
            1,
        );
        let agg = Aggregator::default();

        let first = agg.feed(&Sources::new(&comments, &ratings, &owners));
        let second = agg.feed(&Sources::new(&comments, &ratings, &owners));
        assert!(Arc::ptr_eq(&first, &second));

        comments.push(comment("c9", "dana", None, "2026-03-01T09:09:00Z", "visible"));
        let third = agg.feed(&Sources::new(&comments, &ratings, &owners));
        assert_eq!(ids(&third), vec!["comment:c1", "comment:c9"]);
        let fourth = agg.feed(&Sources::new(&comments, &ratings, &owners));
        assert!(Arc::ptr_eq(&third, &fourth));
    }
}
