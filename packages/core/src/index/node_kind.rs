//! Node id classification
//!
//! Tana marks system nodes and relationship roles with fixed string ids. The
//! indexer resolves every id it meets into a [`NodeKind`] once, at build time,
//! and branches on the enum afterwards.

use crate::models::{DocType, NodeRecord};

/// Substring identifying the trash root node
pub const TRASH: &str = "TRASH";
/// Marker child of tag tuples
pub const TAG: &str = "SYS_A13";
/// Marker child of supertag-definition tuples
pub const SUPERTAG: &str = "SYS_T01";
/// Marker child of field-definition tuples
pub const FIELD: &str = "SYS_T02";
/// Marker child of color-specifier tuples
pub const COLOR: &str = "SYS_A11";
/// Substring shared by every system node id
pub const SYSTEM: &str = "SYS";

/// Name prefix of per-file root nodes, whose children are never content
pub const FILE_ROOT_PREFIX: &str = "Root node for file:";

/// Classification of a node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Trash root
    Trash,
    /// Any other system node
    SystemSentinel,
    /// Tag marker (`SYS_A13`)
    Tag,
    /// Supertag marker (`SYS_T01`)
    SuperTag,
    /// Field marker (`SYS_T02`)
    Field,
    /// Color marker (`SYS_A11`)
    Color,
    /// Relationship record
    Tuple,
    /// Ordinary content
    Content,
}

impl NodeKind {
    /// Classify an id, using its record (when the dump has one) for the doc type
    pub fn classify(id: &str, record: Option<&NodeRecord>) -> Self {
        match id {
            TAG => return NodeKind::Tag,
            SUPERTAG => return NodeKind::SuperTag,
            FIELD => return NodeKind::Field,
            COLOR => return NodeKind::Color,
            _ => {}
        }
        if id.contains(TRASH) {
            NodeKind::Trash
        } else if id.contains(SYSTEM) {
            NodeKind::SystemSentinel
        } else if record.is_some_and(|r| r.props.doc_type() == DocType::Tuple) {
            NodeKind::Tuple
        } else {
            NodeKind::Content
        }
    }

    /// System ids that must never be dereferenced as data
    pub fn is_sentinel(&self) -> bool {
        matches!(
            self,
            NodeKind::SystemSentinel
                | NodeKind::Tag
                | NodeKind::SuperTag
                | NodeKind::Field
                | NodeKind::Color
        )
    }
}

/// Which relationship markers a tuple's children carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TupleMarkers {
    pub tag: bool,
    pub supertag: bool,
    pub field: bool,
    pub color: bool,
}

impl TupleMarkers {
    pub fn from_kinds(kinds: impl IntoIterator<Item = NodeKind>) -> Self {
        let mut markers = Self::default();
        for kind in kinds {
            match kind {
                NodeKind::Tag => markers.tag = true,
                NodeKind::SuperTag => markers.supertag = true,
                NodeKind::Field => markers.field = true,
                NodeKind::Color => markers.color = true,
                _ => {}
            }
        }
        markers
    }

    /// Tag applied to a data node (not a supertag or field definition)
    pub fn is_tag_application(&self) -> bool {
        self.tag && !self.supertag && !self.field
    }
}
