//! File-backed collections: `comments.json`, `ratings.json` and
//! `artifacts.json` under the data directory, each a JSON array.
//!
//! A snapshot is read completely before the engine runs. Versions are content
//! hashes so the gateway's feed cache survives unchanged ticks regardless of
//! filesystem timestamp granularity.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::io::ErrorKind;
use std::path::Path;

use agtinbox_core::collections::{MemoryCollection, MemoryOwners, Sources};
use anyhow::{Context, bail};
use serde::Deserialize;

pub const COMMENTS_FILE: &str = "comments.json";
pub const RATINGS_FILE: &str = "ratings.json";
pub const ARTIFACTS_FILE: &str = "artifacts.json";

#[derive(Debug, Deserialize)]
struct ArtifactOwner {
    id: String,
    owner_handle: String,
}

#[derive(Debug, Default)]
pub struct Snapshot {
    pub comments: MemoryCollection,
    pub ratings: MemoryCollection,
    pub owners: MemoryOwners,
}

impl Snapshot {
    pub fn sources(&self) -> Sources<'_> {
        Sources::new(&self.comments, &self.ratings, &self.owners)
    }
}

pub async fn load_snapshot(data_dir: &Path) -> anyhow::Result<Snapshot> {
    let (comments, comments_version) = load_array(&data_dir.join(COMMENTS_FILE)).await?;
    let (ratings, ratings_version) = load_array(&data_dir.join(RATINGS_FILE)).await?;
    let (artifacts, artifacts_version) = load_array(&data_dir.join(ARTIFACTS_FILE)).await?;

    let mut owners = HashMap::new();
    for record in artifacts {
        match serde_json::from_value::<ArtifactOwner>(record) {
            Ok(a) if !a.owner_handle.trim().is_empty() => {
                owners.insert(a.id, a.owner_handle);
            }
            Ok(a) => tracing::debug!(artifact_id = %a.id, "skipping artifact with blank owner"),
            Err(e) => tracing::debug!("skipping malformed artifact record: {e}"),
        }
    }

    tracing::debug!(
        comments = comments.len(),
        ratings = ratings.len(),
        artifacts = owners.len(),
        "loaded snapshot"
    );

    Ok(Snapshot {
        comments: MemoryCollection::with_version(comments, comments_version),
        ratings: MemoryCollection::with_version(ratings, ratings_version),
        owners: MemoryOwners::with_version(owners, artifacts_version),
    })
}

/// Read a JSON array file. A missing file is an empty collection with
/// version 0.
async fn load_array(path: &Path) -> anyhow::Result<(Vec<serde_json::Value>, u64)> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok((Vec::new(), 0)),
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
    };
    let version = content_version(&content);
    if content.trim().is_empty() {
        return Ok((Vec::new(), version));
    }
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let serde_json::Value::Array(records) = value else {
        bail!("{} must contain a JSON array", path.display());
    };
    Ok((records, version))
}

fn content_version(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    // 0 is reserved for "file absent".
    hasher.finish().max(1)
}
