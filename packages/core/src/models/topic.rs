//! Topic documents produced by topic extraction
//!
//! A topic is a tagged node together with its tags, fields and a flattened,
//! depth-limited outline of its owned content. Downstream embedding pipelines
//! map the `content` lines and `fields` into vector store payloads.

use serde::{Deserialize, Serialize};

/// A structured field value attached to a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TanaField {
    pub field_id: String,
    pub value_id: String,
    /// Field display name
    pub name: String,
    /// Rendered value (plain text or a bracketed reference with tags)
    pub value: String,
}

/// A tag as shown in diagrams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TanaTag {
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// One rendered outline line of a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentElement {
    /// Node id of the line, when known
    pub id: Option<String>,

    /// Line is a bracketed reference to a node rendered elsewhere
    pub is_reference: bool,

    #[serde(default)]
    pub is_field: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,

    /// The rendered Tana paste line, including indentation
    pub content: String,
}

impl ContentElement {
    /// Plain, owned content line
    pub fn text(id: Option<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            is_reference: false,
            is_field: false,
            field_name: None,
            content: content.into(),
        }
    }

    /// Reference line pointing at an independently rendered node
    pub fn reference(id: Option<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            is_reference: true,
            is_field: false,
            field_name: None,
            content: content.into(),
        }
    }

    /// Field line (or continuation value line) rendered into the outline
    pub fn field(field_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            is_reference: false,
            is_field: true,
            field_name: Some(field_name.into()),
            content: content.into(),
        }
    }
}

/// A tagged node extracted for retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDocument {
    pub id: String,

    /// Display name with inline references expanded to `[[name^id]]`
    pub name: String,

    pub description: Option<String>,

    /// Tag display names (`#tag` or `[[#multi word tag]]`)
    pub tags: Vec<String>,

    /// Structured fields, or `None` when fields were folded into `content`
    pub fields: Option<Vec<TanaField>>,

    /// Outline lines; the first line is always the topic's own name
    pub content: Vec<ContentElement>,
}
