//! Dump indexing
//!
//! - [`node_index`] - [`NodeIndex`], the graph builder over a flat dump
//! - [`node_kind`] - Sentinel ids and id classification
//! - [`error`] - [`IndexError`]

pub mod error;
pub mod node_index;
pub mod node_kind;

pub use error::IndexError;
pub use node_index::{Enrichment, FieldEntry, NodeIndex};
pub use node_kind::{NodeKind, TupleMarkers};
