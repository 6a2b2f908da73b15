use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Source Kind ──────────────────────────────────────────────────

/// Raw collection an event was derived from. Doubles as the prefix of
/// every canonical event id (`"<kind>:<raw id>"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SourceKind {
    Comment,
    Rating,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Rating => "rating",
        }
    }

    /// Canonical event id for a raw record of this kind.
    pub fn event_id(self, raw_id: &str) -> String {
        format!("{}:{raw_id}", self.as_str())
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Raw Records ──────────────────────────────────────────────────

/// Author / rater identity as stored alongside raw records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentRef {
    #[serde(default)]
    pub agent_id: Option<String>,
    pub handle: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    #[default]
    Visible,
    Hidden,
    Deleted,
}

impl CommentStatus {
    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }
}

/// A stored comment after boundary validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawComment {
    pub id: String,
    pub artifact_id: String,
    /// `None` for top-level comments.
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default = "default_comment_kind")]
    pub kind: String,
    #[serde(default)]
    pub body_md: Option<String>,
    #[serde(default)]
    pub body_text: Option<String>,
    pub author: AgentRef,
    #[serde(default)]
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
}

fn default_comment_kind() -> String {
    "comment".to_owned()
}

/// A stored rating after boundary validation. Ratings carry no visibility flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRating {
    pub id: String,
    pub artifact_id: String,
    pub rater: AgentRef,
    pub score: f64,
    #[serde(default)]
    pub dims: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub notes_md: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ─── Canonical Event ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EventType {
    #[serde(rename = "comment.created")]
    CommentCreated,
    #[serde(rename = "comment.replied")]
    CommentReplied,
    #[serde(rename = "rating.created")]
    RatingCreated,
    #[serde(rename = "rating.updated")]
    RatingUpdated,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CommentCreated => "comment.created",
            Self::CommentReplied => "comment.replied",
            Self::RatingCreated => "rating.created",
            Self::RatingUpdated => "rating.updated",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display projection of a visible comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: String,
    pub artifact_id: String,
    pub parent_id: Option<String>,
    pub kind: String,
    pub body_md: Option<String>,
    pub body_text: Option<String>,
    pub author: AgentRef,
    pub created_at: DateTime<Utc>,
}

/// Display projection of a rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingView {
    pub id: String,
    pub artifact_id: String,
    pub rater: AgentRef,
    pub score: f64,
    pub dims: BTreeMap<String, serde_json::Value>,
    pub notes_md: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum EventSubject {
    Comment(CommentView),
    Rating(RatingView),
}

/// The only shape the aggregator understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub occurred_at: DateTime<Utc>,
    pub recipient_handle: String,
    /// Agent whose action produced the event.
    pub actor: AgentRef,
    pub artifact_id: String,
    pub subject: EventSubject,
}

impl CanonicalEvent {
    pub fn boundary(&self) -> Boundary {
        Boundary {
            occurred_at: self.occurred_at,
            id: self.id.clone(),
        }
    }

    /// Total order: `occurred_at`, then `id` lexicographically.
    pub fn cmp_feed_order(&self, other: &Self) -> Ordering {
        self.occurred_at
            .cmp(&other.occurred_at)
            .then_with(|| self.id.cmp(&other.id))
    }

    /// Whether this event sorts strictly after `boundary`.
    pub fn is_after(&self, boundary: &Boundary) -> bool {
        self.occurred_at
            .cmp(&boundary.occurred_at)
            .then_with(|| self.id.as_str().cmp(boundary.id.as_str()))
            == Ordering::Greater
    }
}

// ─── Boundary ─────────────────────────────────────────────────────

/// `(occurred_at, id)` position in the merged stream. Field order matters:
/// the derived `Ord` is the feed order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Boundary {
    pub occurred_at: DateTime<Utc>,
    pub id: String,
}

// ─── Query Protocol ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxQuery {
    pub agent_handle: String,
    #[serde(default)]
    pub cursor: Option<String>,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboxPage {
    pub items: Vec<CanonicalEvent>,
    pub next_cursor: Option<String>,
    /// More matching events exist beyond this page in the query's direction.
    pub has_more: bool,
}
