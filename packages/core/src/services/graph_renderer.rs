//! Graph views over a dump
//!
//! - [`render_graph`] - the generic node/link graph, configured by the dump's
//!   own `visualize` settings
//! - [`class_diagram`] - the supertag class hierarchy
//! - [`mermaid_classes`] - the class hierarchy as a Mermaid class diagram
//!
//! Both graphs only contain linked nodes. Links are deduplicated with
//! bidirectional duplicates collapsed, and every link has valid endpoints.

use crate::index::{IndexError, NodeIndex};
use crate::models::{Link, LinkReason, TanaDump, TanaTag, Visualizer};
use crate::utils::patch_node_name;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A node in the generic graph view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Node/link payload in the shape graph front ends consume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderGraph<N = RenderNode> {
    pub directed: bool,
    pub multigraph: bool,
    pub nodes: Vec<N>,
    pub links: Vec<Link>,
}

/// Class hierarchy graph: tags as nodes
pub type ClassGraph = RenderGraph<TanaTag>;

/// Generic graph of a dump, using `dump.visualize` or the default settings
pub fn render_graph(dump: TanaDump) -> Result<RenderGraph, IndexError> {
    let config = dump.visualize.unwrap_or_default();
    let index = NodeIndex::build(dump, config)?;

    Ok(linked_graph(&index, |id, name, color| RenderNode {
        id,
        name: Some(name),
        color,
    }))
}

/// Supertag hierarchy of a dump: tag-to-superclass and tag-to-schema links
pub fn class_diagram(dump: TanaDump) -> Result<ClassGraph, IndexError> {
    let index = NodeIndex::build(dump, Visualizer::class_hierarchy())?;

    Ok(linked_graph(&index, |id, name, color| TanaTag {
        id,
        name: Some(name),
        color,
    }))
}

fn linked_graph<N>(
    index: &NodeIndex,
    make_node: impl Fn(String, String, Option<String>) -> N,
) -> RenderGraph<N> {
    let links: Vec<Link> = index
        .final_links()
        .into_iter()
        .filter(|link| index.valid(&link.source) && index.valid(&link.target))
        .collect();

    let mut seen = HashSet::new();
    let mut nodes = Vec::new();
    for link in &links {
        for id in [&link.source, &link.target] {
            if seen.insert(id.as_str()) {
                nodes.push(make_node(
                    id.clone(),
                    patch_node_name(index, id),
                    index.color_of(id).map(str::to_string),
                ));
            }
        }
    }

    tracing::debug!("Rendered graph with {} nodes, {} links", nodes.len(), links.len());

    RenderGraph {
        directed: false,
        multigraph: false,
        nodes,
        links,
    }
}

/// Mermaid `classDiagram` source for a class graph.
///
/// Superclass links become inheritance arrows. The schema node that
/// tag-schema links point at is left out of the diagram.
pub fn mermaid_classes(graph: &ClassGraph) -> String {
    let mut mermaid = String::from("---\ntitle: Tana Tag Diagram\n---\nclassDiagram\n    direction RL\n");
    let mut schema_node = None;

    for link in &graph.links {
        if link.reason == LinkReason::TagSchema {
            schema_node = Some(link.target.as_str());
        } else {
            mermaid.push_str(&format!("    {} <|-- {}\n", link.target, link.source));
        }
    }

    for node in &graph.nodes {
        if Some(node.id.as_str()) == schema_node {
            continue;
        }
        let Some(name) = node.name.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };
        mermaid.push_str(&format!(
            "    class {}[\"{}\"] {{\n    }}\n",
            node.id,
            name.replace('"', "#quot;")
        ));
    }

    mermaid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::DumpBuilder;

    fn class_dump() -> DumpBuilder {
        DumpBuilder::new()
            .node("schema", "Schema", None, &[])
            .tag("entity", "Entity", Some("schema"), &[])
            .tag("person", "Person \"VIP\"", Some("schema"), &["entity"])
            .color("person", "red_node", "red")
            .node("alice", "Alice", None, &[])
            .apply_tags("alice", &["person"])
    }

    #[test]
    fn test_render_graph_nodes_are_link_endpoints() {
        let graph = render_graph(class_dump().build()).unwrap();

        assert!(!graph.directed);
        assert!(graph
            .links
            .contains(&Link::new("alice", "person", LinkReason::TagApplication)));

        let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        for link in &graph.links {
            assert!(ids.contains(link.source.as_str()));
            assert!(ids.contains(link.target.as_str()));
        }
        assert_eq!(ids.len(), graph.nodes.len());

        let alice = graph.nodes.iter().find(|n| n.id == "alice").unwrap();
        assert_eq!(alice.name.as_deref(), Some("Alice"));
        assert_eq!(alice.color.as_deref(), Some("red"));
    }

    #[test]
    fn test_render_graph_uses_dump_settings() {
        let config = Visualizer {
            include_node_tag_links: false,
            include_content_nodes: false,
            ..Visualizer::default()
        };
        let graph = render_graph(class_dump().visualize(config).build()).unwrap();
        assert!(graph
            .links
            .iter()
            .all(|link| link.reason != LinkReason::TagApplication));
        assert!(graph.nodes.iter().all(|n| n.id != "alice"));
    }

    #[test]
    fn test_class_diagram() {
        let graph = class_diagram(class_dump().build()).unwrap();

        assert_eq!(
            graph.links,
            vec![
                Link::new("entity", "schema", LinkReason::TagSchema),
                Link::new("person", "entity", LinkReason::TagHierarchy),
            ]
        );
        let person = graph.nodes.iter().find(|n| n.id == "person").unwrap();
        assert_eq!(person.color.as_deref(), Some("red"));
    }

    #[test]
    fn test_mermaid_classes() {
        let graph = class_diagram(class_dump().build()).unwrap();
        let mermaid = mermaid_classes(&graph);

        assert!(mermaid.starts_with("---\ntitle: Tana Tag Diagram\n---\nclassDiagram\n"));
        assert!(mermaid.contains("    entity <|-- person\n"));
        assert!(mermaid.contains("    class person[\"Person #quot;VIP#quot;\"] {\n    }\n"));
        assert!(mermaid.contains("    class entity[\"Entity\"]"));
        assert!(!mermaid.contains("class schema"));
        assert!(!mermaid.contains("schema <|--"));
        assert!(mermaid.ends_with("\n    }\n"));
        assert_eq!(mermaid.matches("<|--").count(), 1);
    }
}
