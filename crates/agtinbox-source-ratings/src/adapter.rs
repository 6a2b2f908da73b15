//! Boundary validation for stored ratings. Every well-formed rating is
//! included; there is no visibility flag.

use agtinbox_core::types::RawRating;
use tracing::debug;

pub fn validate(record: serde_json::Value) -> Option<RawRating> {
    let raw: RawRating = match serde_json::from_value(record) {
        Ok(raw) => raw,
        Err(e) => {
            debug!("dropping malformed rating record: {e}");
            return None;
        }
    };

    if raw.id.trim().is_empty() || raw.artifact_id.trim().is_empty() {
        debug!("dropping rating with blank id or artifact_id");
        return None;
    }
    if raw.rater.handle.trim().is_empty() {
        debug!(rating_id = %raw.id, "dropping rating with blank rater handle");
        return None;
    }
    if !raw.score.is_finite() {
        debug!(rating_id = %raw.id, "dropping rating with non-finite score");
        return None;
    }

    Some(raw)
}

pub fn valid_ratings(records: Vec<serde_json::Value>) -> Vec<RawRating> {
    let total = records.len();
    let kept: Vec<RawRating> = records.into_iter().filter_map(validate).collect();
    if kept.len() < total {
        debug!(total, kept = kept.len(), "ratings adapter dropped malformed records");
    }
    kept
}
