//! agtinbox-core: data model and collaborator seams for the agent inbox.
//!
//! Everything here is pure: no I/O, no async. Storage engines implement the
//! traits in [`collections`] and hand the engine a read-only snapshot.

pub mod collections;
pub mod error;
pub mod types;

pub use error::InboxError;
