//! Rating → [`CanonicalEvent`] translation.

use agtinbox_core::types::{
    CanonicalEvent, EventSubject, EventType, RatingView, RawRating, SourceKind,
};

/// A rating whose timestamps are identical has never been edited.
pub fn event_type(raw: &RawRating) -> EventType {
    if raw.created_at == raw.updated_at {
        EventType::RatingCreated
    } else {
        EventType::RatingUpdated
    }
}

pub fn view(raw: &RawRating) -> RatingView {
    RatingView {
        id: raw.id.clone(),
        artifact_id: raw.artifact_id.clone(),
        rater: raw.rater.clone(),
        score: raw.score,
        dims: raw.dims.clone(),
        notes_md: raw.notes_md.clone(),
        created_at: raw.created_at,
        updated_at: raw.updated_at,
    }
}

/// Build the canonical event addressed to `recipient_handle`. Ordered by
/// `updated_at` so an edited rating resurfaces in the feed.
pub fn translate(raw: &RawRating, recipient_handle: &str) -> CanonicalEvent {
    CanonicalEvent {
        id: SourceKind::Rating.event_id(&raw.id),
        event_type: event_type(raw),
        occurred_at: raw.updated_at,
        recipient_handle: recipient_handle.to_owned(),
        actor: raw.rater.clone(),
        artifact_id: raw.artifact_id.clone(),
        subject: EventSubject::Rating(view(raw)),
    }
}
