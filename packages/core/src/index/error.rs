//! Index Error Types
//!
//! Dangling or trashed references are not errors; the indexer skips them.
//! These variants cover calling operations out of order and lookups that can
//! only fail when the caller's view of the index is out of sync.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// `build_index()` has not run yet
    #[error("Node index not built: call build_index() first")]
    NotIndexed,

    /// `build_tag_index()` has not run yet
    #[error("Tag index not built: call build_tag_index() first")]
    TagsNotIndexed,

    /// `build_master_pairs()` has not run yet
    #[error("Links not built: call build_master_pairs() first")]
    LinksNotBuilt,

    /// Node absent from the index (never present, or trashed)
    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    /// No link was recorded between the two nodes
    #[error("No link recorded from {source_id} to {target_id}")]
    MissingLink {
        source_id: String,
        target_id: String,
    },
}

impl IndexError {
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    pub fn missing_link(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self::MissingLink {
            source_id: source_id.into(),
            target_id: target_id.into(),
        }
    }
}
