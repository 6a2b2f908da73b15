//! agtinbox-gateway: merges comment and rating sources into one ordered,
//! per-recipient inbox feed and serves it through cursor pagination.
//!
//! Data flows source adapters → [`resolver`] → [`aggregator`] → [`paginator`].
//! Every query recomputes from the current snapshot; the only retained state
//! is the optional version-keyed [`feed_cache`].

pub mod aggregator;
pub mod config;
pub mod cursor;
pub mod feed_cache;
pub mod paginator;
pub mod resolver;

pub use agtinbox_core::types;
pub use config::{EngineConfig, MissingParentPolicy};
pub use paginator::Paginator;
