//! Tana Dump Records
//!
//! A Tana JSON export is a flat list of node records. Parent/child structure is
//! reconstructed purely from id references: a record's `children` lists the ids
//! it points at, and `props.ownerId` says who actually owns it.
//!
//! # Examples
//!
//! ```rust
//! use tana_helper_core::models::{DocType, TanaDump};
//!
//! let dump: TanaDump = serde_json::from_str(r#"{
//!     "formatVersion": 1,
//!     "docs": [
//!         { "id": "a1", "children": ["b2"], "props": { "name": "Meeting", "_ownerId": null } },
//!         { "id": "b2", "props": { "name": "Notes", "_ownerId": "a1", "_docType": "tuple" } }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(dump.docs.len(), 2);
//! assert_eq!(dump.docs[1].props.doc_type(), DocType::Tuple);
//! ```

use crate::models::Visualizer;
use serde::{Deserialize, Serialize};

/// Document type of a record (`props._docType`).
///
/// Only a handful of types change how the indexer treats a node; everything
/// else is carried through as [`DocType::Other`] so unknown values survive a
/// round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocType {
    /// Ordinary content node (also used when the type is absent)
    #[default]
    Plain,
    /// Relationship record: tag application, field assignment, color spec
    Tuple,
    /// Live search node, never expanded
    Search,
    /// View definition, never expanded
    ViewDef,
    /// Associated data, never expanded
    AssociatedData,
    /// Any other document type
    Other(String),
}

impl DocType {
    pub fn as_str(&self) -> &str {
        match self {
            DocType::Plain => "plain",
            DocType::Tuple => "tuple",
            DocType::Search => "search",
            DocType::ViewDef => "viewDef",
            DocType::AssociatedData => "associatedData",
            DocType::Other(other) => other,
        }
    }

    /// Whether nodes of this type are skipped entirely when classifying children
    pub fn is_unexpanded(&self) -> bool {
        matches!(
            self,
            DocType::Search | DocType::ViewDef | DocType::AssociatedData
        )
    }
}

impl From<String> for DocType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "plain" => DocType::Plain,
            "tuple" => DocType::Tuple,
            "search" => DocType::Search,
            "viewDef" => DocType::ViewDef,
            "associatedData" => DocType::AssociatedData,
            _ => DocType::Other(value),
        }
    }
}

impl From<DocType> for String {
    fn from(value: DocType) -> Self {
        value.as_str().to_string()
    }
}

/// Properties block of a record.
///
/// Tana exports prefix the structural keys with an underscore (`_ownerId`,
/// `_docType`); the bare spellings are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeProps {
    /// Display name, may contain inline reference markup
    #[serde(default)]
    pub name: Option<String>,

    /// Id of the owning node (ownership, not mere reference)
    #[serde(default, rename = "_ownerId", alias = "ownerId")]
    pub owner_id: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(
        default,
        rename = "_docType",
        alias = "docType",
        skip_serializing_if = "Option::is_none"
    )]
    pub doc_type: Option<DocType>,

    /// Creation timestamp (milliseconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
}

impl NodeProps {
    /// Document type, treating an absent type as [`DocType::Plain`]
    pub fn doc_type(&self) -> DocType {
        self.doc_type.clone().unwrap_or_default()
    }
}

/// One entry of a dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Globally unique within a dump
    pub id: String,

    /// Ordered child ids; presence here does not imply ownership
    #[serde(default)]
    pub children: Vec<String>,

    #[serde(default)]
    pub props: NodeProps,
}

impl NodeRecord {
    /// Display name, or the empty string when the record has none
    pub fn name(&self) -> &str {
        self.props.name.as_deref().unwrap_or("")
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.props.owner_id.as_deref()
    }
}

/// A complete dump as exported by Tana.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TanaDump {
    pub docs: Vec<NodeRecord>,

    /// Optional visualizer settings for the graph view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visualize: Option<Visualizer>,
}

impl TanaDump {
    pub fn new(docs: Vec<NodeRecord>) -> Self {
        Self {
            docs,
            visualize: None,
        }
    }
}
