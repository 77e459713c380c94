//! Dump construction helpers for tests and benchmarks
//!
//! Builds the record shapes Tana exports for tags, fields and colors so tests
//! can describe a knowledge base instead of hand-writing tuples.
//!
//! Conventions for the generated helper ids:
//!
//! - `{tag}_meta` / `{tag}_def`: a tag's meta node and supertag tuple
//! - `{node}_tagmeta` / `{node}_tags`: a data node's meta node and tag tuple
//! - `{node}_{field}`: the field tuple for `field` on `node`
//! - `{tag}_color`: a tag's color specifier tuple

use crate::index::node_kind::{COLOR, SUPERTAG, TAG};
use crate::models::{DocType, NodeProps, NodeRecord, TanaDump, Visualizer};

#[derive(Debug, Default, Clone)]
pub struct DumpBuilder {
    docs: Vec<NodeRecord>,
    visualize: Option<Visualizer>,
}

impl DumpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record as is
    pub fn record(mut self, record: NodeRecord) -> Self {
        self.docs.push(record);
        self
    }

    /// Add a plain node
    pub fn node(self, id: &str, name: &str, owner: Option<&str>, children: &[&str]) -> Self {
        self.record(NodeRecord {
            id: id.to_string(),
            children: children.iter().map(|c| c.to_string()).collect(),
            props: NodeProps {
                name: Some(name.to_string()),
                owner_id: owner.map(str::to_string),
                ..Default::default()
            },
        })
    }

    /// Add a plain node whose name is absent
    pub fn unnamed(self, id: &str, owner: Option<&str>, children: &[&str]) -> Self {
        self.record(NodeRecord {
            id: id.to_string(),
            children: children.iter().map(|c| c.to_string()).collect(),
            props: NodeProps {
                owner_id: owner.map(str::to_string),
                ..Default::default()
            },
        })
    }

    /// Add a node with an explicit doc type
    pub fn typed(
        self,
        id: &str,
        name: &str,
        owner: Option<&str>,
        doc_type: DocType,
        children: &[&str],
    ) -> Self {
        self.record(NodeRecord {
            id: id.to_string(),
            children: children.iter().map(|c| c.to_string()).collect(),
            props: NodeProps {
                name: Some(name.to_string()),
                owner_id: owner.map(str::to_string),
                doc_type: Some(doc_type),
                ..Default::default()
            },
        })
    }

    /// Add a tuple record
    pub fn tuple(self, id: &str, owner: Option<&str>, children: &[&str]) -> Self {
        self.record(NodeRecord {
            id: id.to_string(),
            children: children.iter().map(|c| c.to_string()).collect(),
            props: NodeProps {
                owner_id: owner.map(str::to_string),
                doc_type: Some(DocType::Tuple),
                ..Default::default()
            },
        })
    }

    /// Add `child` as owned content of `parent` (appended to its children)
    pub fn child(self, parent: &str, id: &str, name: &str) -> Self {
        self.append_child(parent, id).node(id, name, Some(parent), &[])
    }

    /// Append an existing id to `parent`'s children without changing ownership
    pub fn append_child(mut self, parent: &str, id: &str) -> Self {
        if let Some(record) = self.docs.iter_mut().find(|r| r.id == parent) {
            record.children.push(id.to_string());
        }
        self
    }

    /// Define a supertag owned by `schema`, optionally extending `superclasses`
    pub fn tag(self, tag_id: &str, name: &str, schema: Option<&str>, superclasses: &[&str]) -> Self {
        let meta = format!("{tag_id}_meta");
        let def = format!("{tag_id}_def");
        let mut children = vec![TAG, SUPERTAG];
        children.extend_from_slice(superclasses);

        self.node(tag_id, name, schema, &[])
            .unnamed(&meta, Some(tag_id), &[def.as_str()])
            .tuple(&def, Some(meta.as_str()), &children)
    }

    /// Apply tags to a data node through a meta node and a tag tuple
    pub fn apply_tags(self, node_id: &str, tag_ids: &[&str]) -> Self {
        let meta = format!("{node_id}_tagmeta");
        let tuple = format!("{node_id}_tags");
        let mut children = vec![TAG];
        children.extend_from_slice(tag_ids);

        self.unnamed(&meta, Some(node_id), &[tuple.as_str()])
            .tuple(&tuple, Some(meta.as_str()), &children)
    }

    /// Assign a field on `node_id`; the tuple is appended to the node's children
    pub fn field(self, node_id: &str, field_id: &str, value_ids: &[&str]) -> Self {
        let tuple = format!("{node_id}_{field_id}");
        let mut children = vec![field_id];
        children.extend_from_slice(value_ids);

        self.append_child(node_id, &tuple)
            .tuple(&tuple, Some(node_id), &children)
    }

    /// Give a tag defined with [`tag`](Self::tag) a color
    pub fn color(self, tag_id: &str, color_id: &str, color_name: &str) -> Self {
        let meta = format!("{tag_id}_meta");
        let tuple = format!("{tag_id}_color");

        self.append_child(&meta, &tuple)
            .tuple(&tuple, Some(meta.as_str()), &[COLOR, color_id])
            .node(color_id, color_name, None, &[])
    }

    /// Add a trash root holding `children`
    pub fn trash(self, children: &[&str]) -> Self {
        self.node("ws_TRASH", "Trash", None, children)
    }

    pub fn visualize(mut self, config: Visualizer) -> Self {
        self.visualize = Some(config);
        self
    }

    pub fn build(self) -> TanaDump {
        TanaDump {
            docs: self.docs,
            visualize: self.visualize,
        }
    }
}
