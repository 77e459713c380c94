//! Data structures shared across the crate
//!
//! - [`dump`] - Input records of a Tana JSON export
//! - [`visualizer`] - Link-inclusion settings
//! - [`link`] - Directed links and their reasons
//! - [`topic`] - Extracted topic documents

pub mod dump;
pub mod link;
pub mod topic;
pub mod visualizer;

pub use dump::{DocType, NodeProps, NodeRecord, TanaDump};
pub use link::{dedupe_links, Link, LinkReason};
pub use topic::{ContentElement, TanaField, TanaTag, TopicDocument};
pub use visualizer::Visualizer;
