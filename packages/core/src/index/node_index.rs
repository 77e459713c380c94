//! Tana dump graph indexer
//!
//! Turns the flat record list of a dump into a validated lookup index, enriches
//! nodes with their tags, fields, owned content and colors, and computes the
//! directed link set consumed by topic extraction and the graph views.
//!
//! # Build order
//!
//! 1. [`NodeIndex::build_index`] - id lookup and trash closure
//! 2. [`NodeIndex::build_tag_index`] - supertags, superclasses, tag colors
//! 3. [`NodeIndex::build_master_pairs`] - tag applications, inline references,
//!    fields and child content
//!
//! [`NodeIndex::build`] runs all three. Input records are never mutated; the
//! enrichment lives in a separate map keyed by node id.
//!
//! # Validity
//!
//! A node is valid iff it is present in the dump and not reachable from the
//! trash root. Every dereference is guarded by [`NodeIndex::valid`]; dangling
//! or trashed references are skipped, never treated as errors.

use crate::index::error::IndexError;
use crate::index::node_kind::{NodeKind, TupleMarkers, FILE_ROOT_PREFIX};
use crate::models::{dedupe_links, DocType, Link, LinkReason, NodeRecord, TanaDump, Visualizer};
use crate::utils::inline_refs::inline_ref_ids;
use std::cell::OnceCell;
use std::collections::{HashMap, HashSet, VecDeque};

/// A field assignment found on a node: field definition id plus value ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub field: String,
    pub values: Vec<String>,
}

/// Index-side data attached to a node during indexing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    /// Tag ids applied to the node (superclass ids for a tag node)
    pub tags: Vec<String>,
    /// Field assignments in child order
    pub fields: Vec<FieldEntry>,
    /// Child ids classified as content or child references, in child order
    pub content: Vec<String>,
    /// Color propagated from a tag's color specifier
    pub color: Option<String>,
}

impl Enrichment {
    fn add_tag(&mut self, tag_id: &str) {
        if !self.tags.iter().any(|t| t == tag_id) {
            self.tags.push(tag_id.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum BuildStage {
    Empty,
    Indexed,
    TagsIndexed,
    Linked,
}

type LinkAdjacency = HashMap<String, HashMap<String, LinkReason>>;

/// Index over a single dump, built and discarded per request.
#[derive(Debug)]
pub struct NodeIndex {
    dump: TanaDump,
    config: Visualizer,
    stage: BuildStage,

    /// id -> position in `dump.docs`
    positions: HashMap<String, usize>,
    /// Trash roots and everything reachable from them
    trash: HashSet<String>,
    /// Classification of every record id and child id
    kinds: HashMap<String, NodeKind>,

    /// Tag display name -> tag id
    tags: HashMap<String, String>,
    /// Tag id -> color name
    tag_colors: HashMap<String, String>,
    enriched: HashMap<String, Enrichment>,

    master_pairs: Vec<Link>,
    link_index: OnceCell<LinkAdjacency>,
}

impl NodeIndex {
    pub fn new(dump: TanaDump, config: Visualizer) -> Self {
        Self {
            dump,
            config,
            stage: BuildStage::Empty,
            positions: HashMap::new(),
            trash: HashSet::new(),
            kinds: HashMap::new(),
            tags: HashMap::new(),
            tag_colors: HashMap::new(),
            enriched: HashMap::new(),
            master_pairs: Vec::new(),
            link_index: OnceCell::new(),
        }
    }

    /// Create an index and run every build step
    pub fn build(dump: TanaDump, config: Visualizer) -> Result<Self, IndexError> {
        let mut index = Self::new(dump, config);
        index.build_indices()?;
        index.build_master_pairs()?;
        Ok(index)
    }

    /// Index every record by id and exclude the trash closure.
    ///
    /// Repeated calls are no-ops.
    pub fn build_index(&mut self) {
        if self.stage >= BuildStage::Indexed {
            tracing::debug!("build_index() called on an already indexed dump, skipping");
            return;
        }

        let mut trash_roots = Vec::new();
        for (position, record) in self.dump.docs.iter().enumerate() {
            if NodeKind::classify(&record.id, None) == NodeKind::Trash {
                trash_roots.push(position);
                continue;
            }
            self.positions.insert(record.id.clone(), position);
        }

        for (position, record) in self.dump.docs.iter().enumerate() {
            let kind = NodeKind::classify(&record.id, Some(record));
            self.kinds.insert(record.id.clone(), kind);
            for child_id in &record.children {
                if !self.kinds.contains_key(child_id) {
                    let child = self.positions.get(child_id).map(|p| &self.dump.docs[*p]);
                    self.kinds
                        .insert(child_id.clone(), NodeKind::classify(child_id, child));
                }
            }
            if trash_roots.contains(&position) {
                self.trash.insert(record.id.clone());
            }
        }

        // everything reachable from a trash root is excluded
        let mut queue: VecDeque<&str> = trash_roots
            .iter()
            .flat_map(|p| self.dump.docs[*p].children.iter().map(String::as_str))
            .collect();
        while let Some(id) = queue.pop_front() {
            if !self.trash.insert(id.to_string()) {
                continue;
            }
            if let Some(position) = self.positions.get(id) {
                queue.extend(self.dump.docs[*position].children.iter().map(String::as_str));
            }
        }

        tracing::debug!(
            "Indexed {} records, {} trashed",
            self.positions.len(),
            self.trash.len()
        );
        self.stage = BuildStage::Indexed;
    }

    /// Build the tag name index, superclass links and tag colors.
    ///
    /// Scans the whole dump rather than the post-trash index; every dereference
    /// is still guarded by a validity check.
    pub fn build_tag_index(&mut self) -> Result<(), IndexError> {
        if self.stage < BuildStage::Indexed {
            return Err(IndexError::NotIndexed);
        }
        if self.stage >= BuildStage::TagsIndexed {
            tracing::debug!("build_tag_index() called twice, skipping");
            return Ok(());
        }

        let mut tags = std::mem::take(&mut self.tags);
        let mut tag_colors = std::mem::take(&mut self.tag_colors);
        let mut enriched = std::mem::take(&mut self.enriched);
        let mut links = std::mem::take(&mut self.master_pairs);

        for record in &self.dump.docs {
            if !self.valid(&record.id) || self.kind(&record.id).is_sentinel() {
                continue;
            }
            if record.children.is_empty() {
                continue;
            }

            let markers = self.markers(record);
            if markers.tag {
                if !markers.supertag {
                    // field definitions and tag applications are handled elsewhere
                    continue;
                }

                // supertag tuple -> meta node -> tag node
                let Some(tag_id) = self.grand_owner(record) else {
                    continue;
                };
                if !self.valid(tag_id) {
                    continue;
                }
                let tag_node = self.record(tag_id);
                let Some(tag_name) = tag_node.props.name.as_deref().filter(|n| !n.is_empty())
                else {
                    continue;
                };
                tags.insert(tag_name.to_string(), tag_id.to_string());

                if record.children.len() > 2 {
                    for superclass_id in &record.children {
                        if self.kind(superclass_id).is_sentinel() || !self.valid(superclass_id) {
                            continue;
                        }
                        enriched
                            .entry(tag_id.to_string())
                            .or_default()
                            .add_tag(superclass_id);
                        if self.config.include_tag_tag_links {
                            links.push(Link::new(tag_id, superclass_id, LinkReason::TagHierarchy));
                        }
                    }
                } else if self.config.include_tag_schema_links {
                    if let Some(schema_id) = tag_node.owner_id().filter(|id| self.valid(id)) {
                        links.push(Link::new(tag_id, schema_id, LinkReason::TagSchema));
                    }
                }
            } else if markers.color {
                let color = record
                    .children
                    .iter()
                    .filter(|id| !self.kind(id).is_sentinel() && self.valid(id))
                    .filter_map(|id| self.record(id).props.name.clone())
                    .last();

                let Some(color) = color else {
                    continue;
                };
                match self.grand_owner(record) {
                    Some(tag_id) if self.valid(tag_id) => {
                        tag_colors.insert(tag_id.to_string(), color.clone());
                        enriched.entry(tag_id.to_string()).or_default().color = Some(color);
                    }
                    _ => {}
                }
            }
        }

        tracing::debug!(
            "Tag index built: {} tags, {} colored",
            tags.len(),
            tag_colors.len()
        );

        self.tags = tags;
        self.tag_colors = tag_colors;
        self.enriched = enriched;
        self.master_pairs = links;
        self.stage = BuildStage::TagsIndexed;
        Ok(())
    }

    /// [`build_index`](Self::build_index) followed by
    /// [`build_tag_index`](Self::build_tag_index)
    pub fn build_indices(&mut self) -> Result<(), IndexError> {
        self.build_index();
        self.build_tag_index()
    }

    /// Compute the full link set and enrich nodes with tags, fields and content.
    ///
    /// Returns every link emitted so far, including the tag hierarchy links of
    /// [`build_tag_index`](Self::build_tag_index). The result is a multiset;
    /// use [`final_links`](Self::final_links) for the deduplicated set.
    pub fn build_master_pairs(&mut self) -> Result<&[Link], IndexError> {
        match self.stage {
            BuildStage::Empty => return Err(IndexError::NotIndexed),
            BuildStage::Indexed => return Err(IndexError::TagsNotIndexed),
            BuildStage::Linked => {
                tracing::debug!("build_master_pairs() called twice, returning existing links");
                return Ok(self.master_pairs.as_slice());
            }
            BuildStage::TagsIndexed => {}
        }

        let mut enriched = std::mem::take(&mut self.enriched);
        let mut links = std::mem::take(&mut self.master_pairs);

        for record in &self.dump.docs {
            if !self.valid(&record.id) {
                continue;
            }
            let is_system = self.kind(&record.id).is_sentinel();

            if !is_system && self.markers(record).is_tag_application() {
                self.apply_tags(record, &mut enriched, &mut links);
            }

            if self.config.include_inline_refs {
                self.link_inline_refs(record, &mut links);
            }

            if self.config.include_content_nodes
                && !record.children.is_empty()
                && !is_system
                && !record.name().contains(FILE_ROOT_PREFIX)
            {
                self.classify_children(record, &mut enriched, &mut links);
            }
        }

        tracing::debug!("Built {} links", links.len());

        self.enriched = enriched;
        self.master_pairs = links;
        self.link_index = OnceCell::new();
        self.stage = BuildStage::Linked;
        Ok(self.master_pairs.as_slice())
    }

    /// Tag-application tuple: link the owning data node to each applied tag
    fn apply_tags(
        &self,
        record: &NodeRecord,
        enriched: &mut HashMap<String, Enrichment>,
        links: &mut Vec<Link>,
    ) {
        let Some(owner_id) = record.owner_id().filter(|id| self.valid(id)) else {
            return;
        };
        let data_node_id = match self.record(owner_id).owner_id() {
            Some(id) if self.valid(id) => id,
            other => {
                if !other.is_some_and(|id| self.trashed(id)) {
                    tracing::warn!(
                        "Found tag tuple {} with missing data node {:?}",
                        record.id,
                        other
                    );
                }
                return;
            }
        };

        for tag_id in &record.children {
            if self.kind(tag_id).is_sentinel() || !self.valid(tag_id) {
                continue;
            }
            let data = enriched.entry(data_node_id.to_string()).or_default();
            if self.config.include_node_tag_links {
                links.push(Link::new(data_node_id, tag_id, LinkReason::TagApplication));
                data.add_tag(tag_id);
            }
            if let Some(color) = self.tag_colors.get(tag_id) {
                data.color = Some(color.clone());
            }
        }
    }

    /// Pairwise links among co-referenced nodes, plus direct links if configured
    fn link_inline_refs(&self, record: &NodeRecord, links: &mut Vec<Link>) {
        let ids: Vec<&str> = inline_ref_ids(record.name())
            .into_iter()
            .filter(|id| self.valid(id))
            .collect();
        if ids.is_empty() {
            return;
        }

        for (i, first) in ids.iter().enumerate() {
            for second in &ids[i + 1..] {
                links.push(Link::new(*first, *second, LinkReason::IndirectReference));
            }
        }

        if self.config.include_inline_ref_nodes {
            for id in &ids {
                links.push(Link::new(&record.id, *id, LinkReason::InlineReference));
            }
        }
    }

    /// Sort each child into a field assignment, owned content or a reference
    fn classify_children(
        &self,
        record: &NodeRecord,
        enriched: &mut HashMap<String, Enrichment>,
        links: &mut Vec<Link>,
    ) {
        for child_id in &record.children {
            if self.kind(child_id).is_sentinel() || !self.valid(child_id) {
                continue;
            }
            let child = self.record(child_id);

            match child.props.doc_type() {
                DocType::Tuple => {
                    // first child is the field definition, the rest are values
                    let Some((field_id, value_ids)) = child.children.split_first() else {
                        continue;
                    };
                    if value_ids.is_empty()
                        || self.kind(field_id).is_sentinel()
                        || !self.valid(field_id)
                    {
                        continue;
                    }
                    enriched
                        .entry(record.id.clone())
                        .or_default()
                        .fields
                        .push(FieldEntry {
                            field: field_id.clone(),
                            values: value_ids.to_vec(),
                        });
                    links.push(Link::new(&record.id, field_id, LinkReason::FieldContent));
                }
                doc_type if doc_type.is_unexpanded() => continue,
                _ => {
                    let reason = if child.owner_id() == Some(record.id.as_str()) {
                        LinkReason::ChildContent
                    } else {
                        LinkReason::ChildReference
                    };
                    links.push(Link::new(&record.id, child_id, reason));
                    enriched
                        .entry(record.id.clone())
                        .or_default()
                        .content
                        .push(child_id.clone());
                }
            }
        }
    }

    /// Present in the dump and not trashed
    pub fn valid(&self, id: &str) -> bool {
        self.positions.contains_key(id) && !self.trash.contains(id)
    }

    /// A trash root or reachable from one
    pub fn trashed(&self, id: &str) -> bool {
        self.trash.contains(id)
    }

    /// Look up a valid node; check [`valid`](Self::valid) first
    pub fn node(&self, id: &str) -> Result<&NodeRecord, IndexError> {
        if !self.valid(id) {
            return Err(IndexError::node_not_found(id));
        }
        Ok(self.record(id))
    }

    pub fn kind(&self, id: &str) -> NodeKind {
        match self.kinds.get(id) {
            Some(kind) => *kind,
            None => {
                let record = self.positions.get(id).map(|p| &self.dump.docs[*p]);
                NodeKind::classify(id, record)
            }
        }
    }

    /// Reason of the direct link from `source_id` to `target_id`.
    ///
    /// The adjacency map is built from the raw link list on first use; when a
    /// pair was linked more than once the last link wins. A missing pair means
    /// the caller's content and link views are out of sync.
    pub fn get_linkage_reason(
        &self,
        source_id: &str,
        target_id: &str,
    ) -> Result<LinkReason, IndexError> {
        if self.stage < BuildStage::Linked {
            return Err(IndexError::LinksNotBuilt);
        }

        let adjacency = self.link_index.get_or_init(|| {
            let mut adjacency: LinkAdjacency = HashMap::new();
            for link in &self.master_pairs {
                adjacency
                    .entry(link.source.clone())
                    .or_default()
                    .insert(link.target.clone(), link.reason);
            }
            adjacency
        });

        adjacency
            .get(source_id)
            .and_then(|targets| targets.get(target_id))
            .copied()
            .ok_or_else(|| IndexError::missing_link(source_id, target_id))
    }

    /// Every link emitted, duplicates included
    pub fn master_pairs(&self) -> &[Link] {
        &self.master_pairs
    }

    /// Deduplicated link set with bidirectional duplicates collapsed
    pub fn final_links(&self) -> Vec<Link> {
        dedupe_links(&self.master_pairs)
    }

    pub fn enrichment(&self, id: &str) -> Option<&Enrichment> {
        self.enriched.get(id)
    }

    pub fn tags_of(&self, id: &str) -> &[String] {
        self.enriched.get(id).map(|e| e.tags.as_slice()).unwrap_or(&[])
    }

    pub fn fields_of(&self, id: &str) -> &[FieldEntry] {
        self.enriched.get(id).map(|e| e.fields.as_slice()).unwrap_or(&[])
    }

    pub fn content_of(&self, id: &str) -> &[String] {
        self.enriched
            .get(id)
            .map(|e| e.content.as_slice())
            .unwrap_or(&[])
    }

    pub fn color_of(&self, id: &str) -> Option<&str> {
        self.enriched.get(id).and_then(|e| e.color.as_deref())
    }

    /// Tag id for a supertag display name
    pub fn tag_id(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }

    pub fn tag_color(&self, tag_id: &str) -> Option<&str> {
        self.tag_colors.get(tag_id).map(String::as_str)
    }

    /// Display name of a valid node, empty when absent or unnamed
    pub fn name_of(&self, id: &str) -> &str {
        if self.valid(id) {
            self.record(id).name()
        } else {
            ""
        }
    }

    /// Record lookup without the validity check; callers guarantee presence
    fn record(&self, id: &str) -> &NodeRecord {
        &self.dump.docs[self.positions[id]]
    }

    /// The owner of a record's (valid) owner: tuple -> meta node -> subject
    fn grand_owner<'a>(&'a self, record: &'a NodeRecord) -> Option<&'a str> {
        let owner_id = record.owner_id().filter(|id| self.valid(id))?;
        self.record(owner_id).owner_id()
    }

    fn markers(&self, record: &NodeRecord) -> TupleMarkers {
        TupleMarkers::from_kinds(record.children.iter().map(|id| self.kind(id)))
    }
}

#[cfg(test)]
#[path = "node_index_test.rs"]
mod node_index_test;
