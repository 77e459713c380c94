//! Conversions between Tana paste, JSON and JSON code nodes
//!
//! A "code node" is JSON wrapped in a ```` ```json ```` fence, which is how
//! JSON travels through Tana without being split into nodes.

use crate::codec::error::CodecError;
use crate::codec::outline::{outline_to_tree, FENCE};
use crate::codec::render::tree_to_outline;
use serde_json::Value;

const JSON_FENCE: &str = "```json";

/// The JSON text inside a ```` ```json ```` fence.
///
/// Input without an opening fence is returned unchanged (trimmed).
pub fn extract_json_from_code_node(payload: &str) -> &str {
    let trimmed = payload.trim();
    let Some(rest) = trimmed.strip_prefix(JSON_FENCE) else {
        return trimmed;
    };
    let body = rest.strip_suffix(FENCE).unwrap_or(rest);
    body.trim()
}

/// Tana paste to a JSON list
pub fn jsonify(outline: &str) -> Result<Value, CodecError> {
    outline_to_tree(outline).map(Value::Array)
}

/// JSON text (optionally inside a ```` ```json ```` code node) to Tana paste
pub fn tanify(input: &str) -> Result<String, CodecError> {
    let json: Value = serde_json::from_str(extract_json_from_code_node(input))?;
    Ok(tree_to_outline(&json))
}

/// Tana paste to a pretty-printed JSON code node
pub fn tana_to_code(outline: &str) -> Result<String, CodecError> {
    let json = serde_json::to_string_pretty(&jsonify(outline)?)?;
    Ok(format!("{JSON_FENCE}\n{json}\n{FENCE}\n"))
}

/// A JSON code node back to its JSON value
pub fn code_to_json(payload: &str) -> Result<Value, CodecError> {
    Ok(serde_json::from_str(extract_json_from_code_node(payload))?)
}
