//! agtinbox-source-comments: Comments adapter.
//! Validates raw stored comments, drops hidden/deleted and malformed records,
//! and projects visible comments into [`CanonicalEvent`]s.
//!
//! [`CanonicalEvent`]: agtinbox_core::types::CanonicalEvent

pub mod adapter;
pub mod translate;

pub use agtinbox_core::types;
