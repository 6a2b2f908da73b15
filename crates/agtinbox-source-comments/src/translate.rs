//! Comment → [`CanonicalEvent`] translation.

use agtinbox_core::types::{
    CanonicalEvent, CommentView, EventSubject, EventType, RawComment, SourceKind,
};

/// Event type implied by the comment's position in its thread.
pub fn event_type(raw: &RawComment) -> EventType {
    if raw.parent_id.is_some() {
        EventType::CommentReplied
    } else {
        EventType::CommentCreated
    }
}

pub fn view(raw: &RawComment) -> CommentView {
    CommentView {
        id: raw.id.clone(),
        artifact_id: raw.artifact_id.clone(),
        parent_id: raw.parent_id.clone(),
        kind: raw.kind.clone(),
        body_md: raw.body_md.clone(),
        body_text: raw.body_text.clone(),
        author: raw.author.clone(),
        created_at: raw.created_at,
    }
}

/// Build the canonical event addressed to `recipient_handle`.
pub fn translate(raw: &RawComment, recipient_handle: &str) -> CanonicalEvent {
    CanonicalEvent {
        id: SourceKind::Comment.event_id(&raw.id),
        event_type: event_type(raw),
        occurred_at: raw.created_at,
        recipient_handle: recipient_handle.to_owned(),
        actor: raw.author.clone(),
        artifact_id: raw.artifact_id.clone(),
        subject: EventSubject::Comment(view(raw)),
    }
}
