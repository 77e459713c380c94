//! Tana paste outline codec
//!
//! - [`outline`] - Outline text to JSON tree
//! - [`render`] - JSON tree to outline text
//! - [`json`] - JSON code node helpers
//! - [`error`] - [`CodecError`]

pub mod error;
pub mod json;
pub mod outline;
pub mod render;

pub use error::CodecError;
pub use json::{code_to_json, extract_json_from_code_node, jsonify, tana_to_code, tanify};
pub use outline::outline_to_tree;
pub use render::tree_to_outline;
