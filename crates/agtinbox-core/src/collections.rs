//! Read-only collaborator seams: raw comment/rating collections and the
//! artifact owner lookup.
//!
//! Collections hand out raw JSON records; validation happens in the source
//! adapters so a single corrupt record never fails a query. `version()` is an
//! optional modification stamp used as the feed cache key. Collaborators that
//! cannot provide one return `None` and every query recomputes.

use std::collections::HashMap;

/// Snapshot read of the comments collection.
pub trait CommentsCollection {
    fn read_all(&self) -> Vec<serde_json::Value>;

    fn version(&self) -> Option<u64> {
        None
    }
}

/// Snapshot read of the ratings collection.
pub trait RatingsCollection {
    fn read_all(&self) -> Vec<serde_json::Value>;

    fn version(&self) -> Option<u64> {
        None
    }
}

/// Resolves the handle of the agent owning an artifact.
pub trait ArtifactOwnerLookup {
    fn owner_handle(&self, artifact_id: &str) -> Option<String>;

    fn version(&self) -> Option<u64> {
        None
    }
}

/// The three collaborators a single query reads from.
#[derive(Clone, Copy)]
pub struct Sources<'a> {
    pub comments: &'a dyn CommentsCollection,
    pub ratings: &'a dyn RatingsCollection,
    pub owners: &'a dyn ArtifactOwnerLookup,
}

impl<'a> Sources<'a> {
    pub fn new(
        comments: &'a dyn CommentsCollection,
        ratings: &'a dyn RatingsCollection,
        owners: &'a dyn ArtifactOwnerLookup,
    ) -> Self {
        Self {
            comments,
            ratings,
            owners,
        }
    }

    /// Combined cache key; `None` unless every collaborator is versioned.
    pub fn version_key(&self) -> Option<(u64, u64, u64)> {
        Some((
            self.comments.version()?,
            self.ratings.version()?,
            self.owners.version()?,
        ))
    }
}

// ─── In-Memory Implementations ────────────────────────────────────

/// Vector-backed collection usable as either a comments or ratings source.
#[derive(Debug, Clone, Default)]
pub struct MemoryCollection {
    records: Vec<serde_json::Value>,
    version: Option<u64>,
}

impl MemoryCollection {
    pub fn new(records: Vec<serde_json::Value>) -> Self {
        Self {
            records,
            version: None,
        }
    }

    pub fn with_version(records: Vec<serde_json::Value>, version: u64) -> Self {
        Self {
            records,
            version: Some(version),
        }
    }

    /// Append a record, bumping the version if one is tracked.
    pub fn push(&mut self, record: serde_json::Value) {
        self.records.push(record);
        if let Some(v) = self.version.as_mut() {
            *v = v.saturating_add(1);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CommentsCollection for MemoryCollection {
    fn read_all(&self) -> Vec<serde_json::Value> {
        self.records.clone()
    }

    fn version(&self) -> Option<u64> {
        self.version
    }
}

impl RatingsCollection for MemoryCollection {
    fn read_all(&self) -> Vec<serde_json::Value> {
        self.records.clone()
    }

    fn version(&self) -> Option<u64> {
        self.version
    }
}

impl ArtifactOwnerLookup for HashMap<String, String> {
    fn owner_handle(&self, artifact_id: &str) -> Option<String> {
        self.get(artifact_id).cloned()
    }
}

/// Owner map with an explicit version stamp.
#[derive(Debug, Clone, Default)]
pub struct MemoryOwners {
    owners: HashMap<String, String>,
    version: Option<u64>,
}

impl MemoryOwners {
    pub fn new(owners: HashMap<String, String>) -> Self {
        Self {
            owners,
            version: None,
        }
    }

    pub fn with_version(owners: HashMap<String, String>, version: u64) -> Self {
        Self {
            owners,
            version: Some(version),
        }
    }
}

impl ArtifactOwnerLookup for MemoryOwners {
    fn owner_handle(&self, artifact_id: &str) -> Option<String> {
        self.owners.get(artifact_id).cloned()
    }

    fn version(&self) -> Option<u64> {
        self.version
    }
}
