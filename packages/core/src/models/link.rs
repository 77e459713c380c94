//! Links between dump nodes
//!
//! A link is a directed `(source, target, reason)` triple. The reason
//! vocabulary is fixed and serializes to the short codes the Tana visualizer
//! front end already understands.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Why two nodes are linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LinkReason {
    /// Node name references the target inline
    #[serde(rename = "iin")]
    InlineReference,
    /// Both ends are referenced inline from the same node
    #[serde(rename = "iir")]
    IndirectReference,
    /// Target tag is applied to the source node
    #[serde(rename = "itl")]
    TagApplication,
    /// Target tag is a superclass of the source tag
    #[serde(rename = "itn")]
    TagHierarchy,
    /// Target is owned content of the source
    #[serde(rename = "icl")]
    ChildContent,
    /// Target is a child of the source owned elsewhere
    #[serde(rename = "icr")]
    ChildReference,
    /// Target is a field set on the source
    #[serde(rename = "ifl")]
    FieldContent,
    /// Target is the schema node a tag is defined in
    #[serde(rename = "its")]
    TagSchema,
}

impl LinkReason {
    pub fn code(&self) -> &'static str {
        match self {
            LinkReason::InlineReference => "iin",
            LinkReason::IndirectReference => "iir",
            LinkReason::TagApplication => "itl",
            LinkReason::TagHierarchy => "itn",
            LinkReason::ChildContent => "icl",
            LinkReason::ChildReference => "icr",
            LinkReason::FieldContent => "ifl",
            LinkReason::TagSchema => "its",
        }
    }
}

impl fmt::Display for LinkReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Directed link between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub reason: LinkReason,
}

impl Link {
    pub fn new(source: impl Into<String>, target: impl Into<String>, reason: LinkReason) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            reason,
        }
    }

    /// Same link with source and target swapped
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
            reason: self.reason,
        }
    }
}

/// Collapse a multiset of links into a set without bidirectional duplicates.
///
/// Links are scanned in input order; a link is kept only if neither it nor its
/// reverse (same reason) has been kept already, so the first-seen direction
/// wins and the output order is deterministic.
///
/// # Examples
///
/// ```rust
/// use tana_helper_core::models::{dedupe_links, Link, LinkReason};
///
/// let links = vec![
///     Link::new("a", "b", LinkReason::IndirectReference),
///     Link::new("b", "a", LinkReason::IndirectReference),
///     Link::new("a", "b", LinkReason::IndirectReference),
///     Link::new("b", "a", LinkReason::ChildContent),
/// ];
/// let unique = dedupe_links(&links);
/// assert_eq!(unique.len(), 2);
/// assert_eq!(unique[0], Link::new("a", "b", LinkReason::IndirectReference));
/// ```
pub fn dedupe_links(links: &[Link]) -> Vec<Link> {
    let mut kept: HashSet<(&str, &str, LinkReason)> = HashSet::with_capacity(links.len());
    let mut result = Vec::new();

    for link in links {
        let forward = (link.source.as_str(), link.target.as_str(), link.reason);
        let backward = (link.target.as_str(), link.source.as_str(), link.reason);
        if kept.contains(&forward) || kept.contains(&backward) {
            continue;
        }
        kept.insert(forward);
        result.push(link.clone());
    }

    result
}
