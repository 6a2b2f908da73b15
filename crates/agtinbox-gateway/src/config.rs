//! Engine policy switches for behavior the stored data does not settle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown missing-parent policy {0:?} (expected \"fallback_to_owner\" or \"drop\")")]
    UnknownMissingParentPolicy(String),
}

/// Routing for a reply whose parent comment is absent from the snapshot
/// (deleted, hidden, or never stored).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingParentPolicy {
    /// Route to the artifact owner, as a top-level comment would be.
    #[default]
    FallbackToOwner,
    /// Produce no event.
    Drop,
}

impl MissingParentPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FallbackToOwner => "fallback_to_owner",
            Self::Drop => "drop",
        }
    }
}

impl fmt::Display for MissingParentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingParentPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "fallback_to_owner" | "owner" => Ok(Self::FallbackToOwner),
            "drop" => Ok(Self::Drop),
            _ => Err(ConfigError::UnknownMissingParentPolicy(s.to_owned())),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Drop events whose actor is also the recipient. Off by default.
    pub suppress_self_notifications: bool,
    pub missing_parent: MissingParentPolicy,
}
