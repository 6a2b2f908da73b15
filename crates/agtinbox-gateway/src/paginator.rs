//! Public entry point: chronological listing and delta polling over the
//! aggregated feed of one recipient.
//!
//! # Cursor semantics
//!
//! - Cursors encode the `(occurred_at, id)` of an item already shown.
//! - `list_events` returns items strictly after the cursor, oldest first;
//!   `next_cursor` is the last returned item.
//! - `list_events_delta` without a cursor returns the newest `limit` items,
//!   newest first; `next_cursor` is the newest item (high-water mark).
//! - `list_events_delta` with a cursor returns the oldest `limit` items
//!   strictly after it, presented newest first, so a backlog larger than
//!   `limit` drains across polls without gaps.
//! - With nothing to return, `next_cursor` echoes the decoded input boundary
//!   (or `None` when there was none).
//! - Comparison against the cursor is strict on the whole `(occurred_at, id)`
//!   tuple. An event written later with the same `occurred_at` as the cursor
//!   but a smaller `id` sorts behind it and is never returned to that caller.

use agtinbox_core::InboxError;
use agtinbox_core::collections::Sources;
use agtinbox_core::types::{Boundary, CanonicalEvent, InboxPage, InboxQuery};
use tracing::{debug, trace};

use crate::aggregator::Aggregator;
use crate::config::EngineConfig;
use crate::cursor;

#[derive(Debug, Default)]
pub struct Paginator {
    aggregator: Aggregator,
}

impl Paginator {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            aggregator: Aggregator::new(config),
        }
    }

    /// Chronological (oldest-unseen-first) pagination.
    pub fn list_events(
        &self,
        sources: &Sources<'_>,
        query: &InboxQuery,
    ) -> Result<InboxPage, InboxError> {
        let limit = validate(query)?;
        let boundary = decode_boundary(query.cursor.as_deref());
        let events = self.aggregator.events_for(sources, &query.agent_handle);

        let start = first_after(&events, boundary.as_ref());
        let unseen = &events[start..];
        let items: Vec<CanonicalEvent> = unseen.iter().take(limit).cloned().collect();
        let has_more = unseen.len() > items.len();

        let next_cursor = items
            .last()
            .map(CanonicalEvent::boundary)
            .or(boundary)
            .map(|b| cursor::encode(&b));

        trace!(
            recipient = %query.agent_handle,
            returned = items.len(),
            has_more,
            "list_events"
        );
        Ok(InboxPage {
            items,
            next_cursor,
            has_more,
        })
    }

    /// "What's new" polling, newest first.
    pub fn list_events_delta(
        &self,
        sources: &Sources<'_>,
        query: &InboxQuery,
    ) -> Result<InboxPage, InboxError> {
        let limit = validate(query)?;
        let boundary = decode_boundary(query.cursor.as_deref());
        let events = self.aggregator.events_for(sources, &query.agent_handle);

        let (window, has_more) = match boundary.as_ref() {
            None => {
                let start = events.len().saturating_sub(limit);
                (&events[start..], start > 0)
            }
            Some(b) => {
                let newer = &events[first_after(&events, Some(b))..];
                let end = newer.len().min(limit);
                (&newer[..end], newer.len() > end)
            }
        };
        let items: Vec<CanonicalEvent> = window.iter().rev().cloned().collect();

        let next_cursor = items
            .first()
            .map(CanonicalEvent::boundary)
            .or(boundary)
            .map(|b| cursor::encode(&b));

        trace!(
            recipient = %query.agent_handle,
            returned = items.len(),
            has_more,
            "list_events_delta"
        );
        Ok(InboxPage {
            items,
            next_cursor,
            has_more,
        })
    }

    /// Unpaginated feed for `agent_handle`, ascending.
    pub fn full_feed(
        &self,
        sources: &Sources<'_>,
        agent_handle: &str,
    ) -> Result<Vec<CanonicalEvent>, InboxError> {
        if agent_handle.trim().is_empty() {
            return Err(InboxError::EmptyRecipient);
        }
        Ok(self.aggregator.events_for(sources, agent_handle))
    }
}

fn validate(query: &InboxQuery) -> Result<usize, InboxError> {
    if query.agent_handle.trim().is_empty() {
        return Err(InboxError::EmptyRecipient);
    }
    if query.limit == 0 {
        return Err(InboxError::InvalidLimit(query.limit));
    }
    Ok(query.limit as usize)
}

fn decode_boundary(raw: Option<&str>) -> Option<Boundary> {
    let raw = raw?;
    let boundary = cursor::decode(raw);
    if boundary.is_none() {
        debug!("undecodable cursor, treating as absent");
    }
    boundary
}

/// Index of the first event strictly after `boundary` in an ascending feed.
fn first_after(events: &[CanonicalEvent], boundary: Option<&Boundary>) -> usize {
    match boundary {
        None => 0,
        Some(b) => events.partition_point(|e| !e.is_after(b)),
    }
}
