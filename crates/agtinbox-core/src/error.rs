//! Caller-facing errors. Record corruption and bad cursors never end up here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InboxError {
    #[error("agent_handle must not be empty")]
    EmptyRecipient,

    #[error("limit must be a positive integer, got {0}")]
    InvalidLimit(u32),
}
