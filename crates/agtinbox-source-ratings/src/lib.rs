//! agtinbox-source-ratings: Ratings adapter.
//! Validates raw stored ratings and projects them into [`CanonicalEvent`]s,
//! classifying each as created or updated.
//!
//! [`CanonicalEvent`]: agtinbox_core::types::CanonicalEvent

pub mod adapter;
pub mod translate;

pub use agtinbox_core::types;
