//! Boundary validation for stored comments.

use agtinbox_core::types::RawComment;
use tracing::debug;

/// Validate one stored record. Returns `None` for anything malformed:
/// missing required fields, wrong types, unknown status, unparseable
/// timestamps, or blank identifiers.
pub fn validate(record: serde_json::Value) -> Option<RawComment> {
    let mut raw: RawComment = match serde_json::from_value(record) {
        Ok(raw) => raw,
        Err(e) => {
            debug!("dropping malformed comment record: {e}");
            return None;
        }
    };

    if raw.id.trim().is_empty() || raw.artifact_id.trim().is_empty() {
        debug!("dropping comment with blank id or artifact_id");
        return None;
    }
    if raw.author.handle.trim().is_empty() {
        debug!(comment_id = %raw.id, "dropping comment with blank author handle");
        return None;
    }

    // Blank parent ids are written by some clients for top-level comments.
    if raw.parent_id.as_deref().is_some_and(|p| p.trim().is_empty()) {
        raw.parent_id = None;
    }

    Some(raw)
}

/// Project a collection snapshot into the visible, well-formed comments.
pub fn visible_comments(records: Vec<serde_json::Value>) -> Vec<RawComment> {
    let total = records.len();
    let visible: Vec<RawComment> = records
        .into_iter()
        .filter_map(validate)
        .filter(|c| c.status.is_visible())
        .collect();
    if visible.len() < total {
        debug!(
            total,
            kept = visible.len(),
            "comments adapter dropped hidden, deleted, or malformed records"
        );
    }
    visible
}
