//! Opaque cursor codec for `(occurred_at, id)` boundaries.
//!
//! Wire format: `"ib1." + base64url(rfc3339_nanos + "\n" + id)`. Anything
//! that does not decode to a boundary yields `None`; callers treat that as
//! "no boundary" so pollers survive corrupted or foreign cursors.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, SecondsFormat, Utc};

use agtinbox_core::types::Boundary;

const CURSOR_PREFIX: &str = "ib1.";

pub fn encode(boundary: &Boundary) -> String {
    let payload = format!(
        "{}\n{}",
        boundary
            .occurred_at
            .to_rfc3339_opts(SecondsFormat::Nanos, true),
        boundary.id
    );
    format!("{CURSOR_PREFIX}{}", URL_SAFE_NO_PAD.encode(payload))
}

pub fn decode(cursor: &str) -> Option<Boundary> {
    let encoded = cursor.trim().strip_prefix(CURSOR_PREFIX)?;
    let bytes = URL_SAFE_NO_PAD.decode(encoded).ok()?;
    let payload = String::from_utf8(bytes).ok()?;
    let (ts, id) = payload.split_once('\n')?;
    if id.is_empty() {
        return None;
    }
    let occurred_at = DateTime::parse_from_rfc3339(ts).ok()?.with_timezone(&Utc);
    Some(Boundary {
        occurred_at,
        id: id.to_owned(),
    })
}
