//! Visualizer link-inclusion settings
//!
//! Controls which kinds of links [`NodeIndex`](crate::index::NodeIndex) emits.
//! The same flag set drives the generic graph view, the class diagram and
//! topic extraction; each consumer picks the preset it needs.

use serde::{Deserialize, Serialize};

/// Which link kinds to emit while indexing a dump.
///
/// Missing keys in a serialized config take their [`Default`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Visualizer {
    /// Child-content / child-reference links and per-node content lists
    pub include_content_nodes: bool,

    /// Links implied by inline reference markup inside node names
    pub include_inline_refs: bool,

    /// Links from a tag to its declared superclass tags
    pub include_tag_tag_links: bool,

    /// Links from a data node to the tags applied to it
    pub include_node_tag_links: bool,

    /// Also link the referencing node to each node it references inline.
    /// When false only the pairwise links among co-referenced nodes are kept.
    pub include_inline_ref_nodes: bool,

    /// Links from a tag to its schema definition node (class diagram only)
    pub include_tag_schema_links: bool,
}

impl Default for Visualizer {
    fn default() -> Self {
        Self {
            include_content_nodes: true,
            include_inline_refs: true,
            include_tag_tag_links: true,
            include_node_tag_links: true,
            include_inline_ref_nodes: true,
            include_tag_schema_links: false,
        }
    }
}

impl Visualizer {
    /// Settings used for topic extraction: tagged nodes and their owned content
    pub fn topics() -> Self {
        Self {
            include_content_nodes: true,
            include_inline_refs: false,
            include_tag_tag_links: false,
            include_node_tag_links: true,
            include_inline_ref_nodes: false,
            include_tag_schema_links: false,
        }
    }

    /// Settings used for the tag class hierarchy
    pub fn class_hierarchy() -> Self {
        Self {
            include_content_nodes: false,
            include_inline_refs: false,
            include_tag_tag_links: true,
            include_node_tag_links: false,
            include_inline_ref_nodes: false,
            include_tag_schema_links: true,
        }
    }
}
