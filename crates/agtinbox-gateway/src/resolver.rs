//! Recipient resolution: which agent handle receives each record.
//!
//! - Top-level comment → artifact owner.
//! - Reply → author of the parent comment (same snapshot), falling back per
//!   [`MissingParentPolicy`] when the parent is absent.
//! - Rating → artifact owner.
//!
//! Resolution depends only on the snapshot and the engine config, never on
//! who is asking.

use std::collections::HashMap;

use agtinbox_core::collections::ArtifactOwnerLookup;
use agtinbox_core::types::{AgentRef, RawComment, RawRating};
use tracing::debug;

use crate::config::{EngineConfig, MissingParentPolicy};

pub struct RecipientResolver<'a> {
    owners: &'a dyn ArtifactOwnerLookup,
    /// comment id → author handle, over the visible comments of the snapshot.
    parent_authors: HashMap<&'a str, &'a str>,
    config: &'a EngineConfig,
}

impl<'a> RecipientResolver<'a> {
    pub fn new(
        comments: &'a [RawComment],
        owners: &'a dyn ArtifactOwnerLookup,
        config: &'a EngineConfig,
    ) -> Self {
        let parent_authors = comments
            .iter()
            .map(|c| (c.id.as_str(), c.author.handle.as_str()))
            .collect();
        Self {
            owners,
            parent_authors,
            config,
        }
    }

    pub fn resolve_comment(&self, raw: &RawComment) -> Option<String> {
        let recipient = match raw.parent_id.as_deref() {
            None => self.owner_of(&raw.artifact_id)?,
            Some(parent_id) => match self.parent_authors.get(parent_id) {
                Some(&handle) => handle.to_owned(),
                None => match self.config.missing_parent {
                    MissingParentPolicy::FallbackToOwner => {
                        debug!(
                            comment_id = %raw.id,
                            parent_id,
                            "reply parent not found, routing to artifact owner"
                        );
                        self.owner_of(&raw.artifact_id)?
                    }
                    MissingParentPolicy::Drop => {
                        debug!(comment_id = %raw.id, parent_id, "reply parent not found, dropping");
                        return None;
                    }
                },
            },
        };
        self.admit(&raw.author, recipient)
    }

    pub fn resolve_rating(&self, raw: &RawRating) -> Option<String> {
        let recipient = self.owner_of(&raw.artifact_id)?;
        self.admit(&raw.rater, recipient)
    }

    fn owner_of(&self, artifact_id: &str) -> Option<String> {
        let owner = self.owners.owner_handle(artifact_id);
        if owner.is_none() {
            debug!(artifact_id, "no owner for artifact, record has no recipient");
        }
        owner
    }

    fn admit(&self, actor: &AgentRef, recipient: String) -> Option<String> {
        if self.config.suppress_self_notifications && actor.handle == recipient {
            return None;
        }
        Some(recipient)
    }
}
