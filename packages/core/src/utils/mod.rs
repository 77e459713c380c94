//! Utility functions shared by the indexer and the extractors

pub mod inline_refs;

pub use inline_refs::{patch_name, patch_node_name};
