//! Extraction Services
//!
//! Consumers of a built [`NodeIndex`](crate::index::NodeIndex):
//!
//! - `TopicExtractor` - Tagged nodes as retrieval-ready topic documents
//! - `graph_renderer` - Generic graph view, class diagram and Mermaid output
//! - `context_extractor` - Topics recovered from pasted outline context
//!
//! Each call builds and discards its own index; nothing is shared between
//! calls.

pub mod context_extractor;
pub mod graph_renderer;
pub mod topic_extractor;

pub use context_extractor::{
    extract_topic_from_context, is_reference_content, node_ids_from_text, prune_reference_nodes,
    tags_from_name,
};
pub use graph_renderer::{
    class_diagram, mermaid_classes, render_graph, ClassGraph, RenderGraph, RenderNode,
};
pub use topic_extractor::{add_tags, tag_list, TopicExtractor};
