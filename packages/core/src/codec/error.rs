//! Codec Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    /// A field carries an inline value and nested children, or mixes nested
    /// fields with plain children
    #[error("Field '{field}' on line {line} has both a value and children")]
    FieldWithValueAndChildren { field: String, line: usize },

    #[error("Code block opened on line {line} is never closed")]
    UnterminatedCodeBlock { line: usize },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    pub fn field_with_value_and_children(field: impl Into<String>, line: usize) -> Self {
        Self::FieldWithValueAndChildren {
            field: field.into(),
            line,
        }
    }
}
