//! Tana Helper Core
//!
//! Indexing and extraction over Tana workspace exports, plus the Tana paste
//! outline codec.
//!
//! # Architecture
//!
//! - **Flat input, enriched index**: a dump is a flat list of records; the
//!   [`NodeIndex`] resolves trash, tags, fields and content into a separate
//!   enrichment map and never mutates the input
//! - **Typed links**: every relationship is a `(source, target, reason)`
//!   [`Link`]; graph views and topic extraction all start from the same set
//! - **Per-call state**: each operation builds its own index, so calls can run
//!   concurrently without locking
//!
//! # Modules
//!
//! - [`models`] - Dump records, links, topics and visualizer settings
//! - [`index`] - [`NodeIndex`] and node classification
//! - [`services`] - Topic extraction, graph rendering and context extraction
//! - [`codec`] - Tana paste outline to JSON and back
//! - [`config`] - Extractor settings
//! - [`utils`] - Inline reference expansion
//! - [`testing`] - Dump builders for tests and benchmarks

pub mod codec;
pub mod config;
pub mod index;
pub mod models;
pub mod services;
pub mod testing;
pub mod utils;

// Re-export commonly used types
pub use codec::{outline_to_tree, tree_to_outline, CodecError};
pub use config::{ConfigError, ExtractorConfig, FieldMode};
pub use index::{IndexError, NodeIndex, NodeKind};
pub use models::*;
pub use services::*;
pub use utils::{patch_name, patch_node_name};
