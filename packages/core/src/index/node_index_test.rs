//! Tests for NodeIndex
//!
//! Covers trash handling, build ordering, tag/color resolution, inline
//! references and child classification.

#[cfg(test)]
mod tests {
    use crate::index::{IndexError, NodeIndex};
    use crate::models::{DocType, Link, LinkReason, Visualizer};
    use crate::testing::DumpBuilder;

    fn has_link(index: &NodeIndex, source: &str, target: &str, reason: LinkReason) -> bool {
        index
            .master_pairs()
            .contains(&Link::new(source, target, reason))
    }

    /// Person extends Entity; alice is a Person with a field and some content
    fn people_dump() -> DumpBuilder {
        DumpBuilder::new()
            .node("schema", "Schema", None, &[])
            .tag("entity", "Entity", Some("schema"), &[])
            .tag("person", "Person", Some("schema"), &["entity"])
            .color("person", "red_node", "red")
            .node("status", "Status", Some("schema"), &[])
            .node("done", "Done", None, &[])
            .node("alice", "Alice", None, &[])
            .apply_tags("alice", &["person"])
            .field("alice", "status", &["done"])
            .child("alice", "c1", "Likes tea")
    }

    // =========================================================================
    // Trash
    // =========================================================================

    #[test]
    fn test_trash_is_transitive() {
        let dump = DumpBuilder::new()
            .node("keep", "Keep", None, &[])
            .node("deleted", "Deleted", None, &["deleted_child"])
            .node("deleted_child", "Deleted child", Some("deleted"), &["grandchild"])
            .node("grandchild", "Grandchild", Some("deleted_child"), &[])
            .trash(&["deleted"])
            .build();

        let mut index = NodeIndex::new(dump, Visualizer::default());
        index.build_index();

        assert!(index.valid("keep"));
        for id in ["ws_TRASH", "deleted", "deleted_child", "grandchild"] {
            assert!(!index.valid(id), "{id} should be invalid");
            assert!(index.trashed(id), "{id} should be trashed");
        }
        assert_eq!(
            index.node("grandchild").unwrap_err(),
            IndexError::node_not_found("grandchild")
        );
    }

    #[test]
    fn test_trash_cycle_terminates() {
        let dump = DumpBuilder::new()
            .node("a", "A", None, &["b"])
            .node("b", "B", None, &["a"])
            .trash(&["a"])
            .build();

        let mut index = NodeIndex::new(dump, Visualizer::default());
        index.build_index();
        assert!(index.trashed("a"));
        assert!(index.trashed("b"));
    }

    #[test]
    fn test_unknown_id_is_neither_valid_nor_trashed() {
        let mut index = NodeIndex::new(DumpBuilder::new().build(), Visualizer::default());
        index.build_index();
        assert!(!index.valid("nope"));
        assert!(!index.trashed("nope"));
    }

    #[test]
    fn test_trashed_child_is_not_linked() {
        let dump = DumpBuilder::new()
            .node("parent", "Parent", None, &["gone", "kept"])
            .node("gone", "Gone", Some("parent"), &[])
            .node("kept", "Kept", Some("parent"), &[])
            .trash(&["gone"])
            .build();

        let index = NodeIndex::build(dump, Visualizer::default()).unwrap();
        assert_eq!(index.content_of("parent"), ["kept".to_string()]);
        for link in index.master_pairs() {
            assert!(index.valid(&link.source) && index.valid(&link.target));
        }
    }

    // =========================================================================
    // Build ordering
    // =========================================================================

    #[test]
    fn test_steps_must_run_in_order() {
        let mut index = NodeIndex::new(people_dump().build(), Visualizer::default());

        assert_eq!(index.build_tag_index(), Err(IndexError::NotIndexed));
        assert_eq!(
            index.build_master_pairs().unwrap_err(),
            IndexError::NotIndexed
        );

        index.build_index();
        assert_eq!(
            index.build_master_pairs().unwrap_err(),
            IndexError::TagsNotIndexed
        );
        assert_eq!(
            index.get_linkage_reason("alice", "c1"),
            Err(IndexError::LinksNotBuilt)
        );

        index.build_tag_index().unwrap();
        assert!(index.build_master_pairs().is_ok());
    }

    #[test]
    fn test_repeated_builds_do_not_duplicate_links() {
        let mut index = NodeIndex::new(people_dump().build(), Visualizer::default());
        index.build_indices().unwrap();
        index.build_index();
        index.build_tag_index().unwrap();
        let first = index.build_master_pairs().unwrap().len();
        let second = index.build_master_pairs().unwrap().len();
        assert_eq!(first, second);
        assert_eq!(index.tags_of("alice"), ["person".to_string()]);
    }

    // =========================================================================
    // Tags and colors
    // =========================================================================

    #[test]
    fn test_tag_hierarchy_link() {
        let index = NodeIndex::build(people_dump().build(), Visualizer::default()).unwrap();

        assert!(has_link(&index, "person", "entity", LinkReason::TagHierarchy));
        assert_eq!(index.tags_of("person"), ["entity".to_string()]);
        assert_eq!(index.tag_id("Person"), Some("person"));
        assert_eq!(index.tag_id("Entity"), Some("entity"));
    }

    #[test]
    fn test_tag_hierarchy_without_links_still_records_superclass() {
        let config = Visualizer {
            include_tag_tag_links: false,
            ..Visualizer::default()
        };
        let index = NodeIndex::build(people_dump().build(), config).unwrap();

        assert!(!has_link(&index, "person", "entity", LinkReason::TagHierarchy));
        assert_eq!(index.tags_of("person"), ["entity".to_string()]);
    }

    #[test]
    fn test_tag_schema_links_only_when_enabled() {
        let index = NodeIndex::build(people_dump().build(), Visualizer::default()).unwrap();
        assert!(!has_link(&index, "entity", "schema", LinkReason::TagSchema));

        let index =
            NodeIndex::build(people_dump().build(), Visualizer::class_hierarchy()).unwrap();
        assert!(has_link(&index, "entity", "schema", LinkReason::TagSchema));
        // a tag with a superclass gets the hierarchy link instead
        assert!(!has_link(&index, "person", "schema", LinkReason::TagSchema));
        assert!(index.content_of("alice").is_empty());
    }

    #[test]
    fn test_tag_application_and_color() {
        let index = NodeIndex::build(people_dump().build(), Visualizer::default()).unwrap();

        assert!(has_link(&index, "alice", "person", LinkReason::TagApplication));
        assert_eq!(index.tags_of("alice"), ["person".to_string()]);
        assert_eq!(index.tag_color("person"), Some("red"));
        assert_eq!(index.color_of("person"), Some("red"));
        assert_eq!(index.color_of("alice"), Some("red"));
        assert_eq!(index.color_of("entity"), None);
    }

    #[test]
    fn test_node_tag_links_disabled_skips_tags_but_keeps_color() {
        let config = Visualizer {
            include_node_tag_links: false,
            ..Visualizer::default()
        };
        let index = NodeIndex::build(people_dump().build(), config).unwrap();

        assert!(!has_link(&index, "alice", "person", LinkReason::TagApplication));
        assert!(index.tags_of("alice").is_empty());
        assert_eq!(index.color_of("alice"), Some("red"));
    }

    #[test]
    fn test_last_colored_tag_wins() {
        let dump = people_dump()
            .color("entity", "blue_node", "blue")
            .tag("note", "Note", Some("schema"), &[])
            .node("bob", "Bob", None, &[])
            .apply_tags("bob", &["person", "entity"])
            .node("carol", "Carol", None, &[])
            .apply_tags("carol", &["entity", "person"])
            .node("dave", "Dave", None, &[])
            .apply_tags("dave", &["person", "note"])
            .build();
        let index = NodeIndex::build(dump, Visualizer::default()).unwrap();

        assert_eq!(index.color_of("bob"), Some("blue"));
        assert_eq!(index.color_of("carol"), Some("red"));
        // an uncolored tag does not clear an earlier color
        assert_eq!(index.color_of("dave"), Some("red"));
        assert_eq!(index.tags_of("dave"), ["person".to_string(), "note".to_string()]);
    }

    #[test]
    fn test_tag_tuple_with_trashed_data_node_is_skipped() {
        let dump = people_dump()
            .node("bob", "Bob", None, &[])
            .apply_tags("bob", &["person"])
            .trash(&["bob"])
            .build();
        let index = NodeIndex::build(dump, Visualizer::default()).unwrap();

        assert!(!index
            .master_pairs()
            .iter()
            .any(|link| link.source == "bob" || link.target == "bob"));
    }

    #[test]
    fn test_trashed_tag_is_not_applied() {
        let dump = people_dump()
            .tag("old", "Old", Some("schema"), &[])
            .apply_tags("c1", &["old"])
            .trash(&["old"])
            .build();
        let index = NodeIndex::build(dump, Visualizer::default()).unwrap();

        assert!(index.tags_of("c1").is_empty());
        assert_eq!(index.tag_id("Old"), None);
    }

    // =========================================================================
    // Inline references
    // =========================================================================

    fn inline_dump() -> DumpBuilder {
        DumpBuilder::new()
            .node("a", "A", None, &[])
            .node("b", "B", None, &[])
            .node("c", "C", None, &[])
            .node(
                "join",
                r#"<span data-inlineref-node="a"></span>, <span data-inlineref-node="b"></span>, <span data-inlineref-node="c"></span> and <span data-inlineref-node="missing"></span>"#,
                None,
                &[],
            )
    }

    #[test]
    fn test_inline_refs_pairwise_and_direct() {
        let index = NodeIndex::build(inline_dump().build(), Visualizer::default()).unwrap();

        for (x, y) in [("a", "b"), ("a", "c"), ("b", "c")] {
            assert!(has_link(&index, x, y, LinkReason::IndirectReference));
        }
        for target in ["a", "b", "c"] {
            assert!(has_link(&index, "join", target, LinkReason::InlineReference));
        }
        assert!(!has_link(&index, "join", "missing", LinkReason::InlineReference));
    }

    #[test]
    fn test_inline_refs_pairwise_only() {
        let config = Visualizer {
            include_inline_ref_nodes: false,
            ..Visualizer::default()
        };
        let index = NodeIndex::build(inline_dump().build(), config).unwrap();

        assert!(has_link(&index, "a", "b", LinkReason::IndirectReference));
        assert!(!index
            .master_pairs()
            .iter()
            .any(|link| link.reason == LinkReason::InlineReference));
    }

    #[test]
    fn test_inline_refs_disabled() {
        let config = Visualizer {
            include_inline_refs: false,
            ..Visualizer::default()
        };
        let index = NodeIndex::build(inline_dump().build(), config).unwrap();
        assert!(index.master_pairs().is_empty());
    }

    // =========================================================================
    // Child classification
    // =========================================================================

    #[test]
    fn test_content_reference_and_field_classification() {
        let dump = people_dump()
            .node("shared", "Shared note", None, &[])
            .append_child("alice", "shared")
            .build();
        let index = NodeIndex::build(dump, Visualizer::default()).unwrap();

        assert_eq!(
            index.get_linkage_reason("alice", "c1"),
            Ok(LinkReason::ChildContent)
        );
        assert_eq!(
            index.get_linkage_reason("alice", "shared"),
            Ok(LinkReason::ChildReference)
        );
        assert_eq!(
            index.get_linkage_reason("alice", "status"),
            Ok(LinkReason::FieldContent)
        );
        assert_eq!(
            index.content_of("alice"),
            ["c1".to_string(), "shared".to_string()]
        );

        let fields = index.fields_of("alice");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "status");
        assert_eq!(fields[0].values, ["done".to_string()]);
    }

    #[test]
    fn test_unexpanded_doc_types_are_skipped() {
        let dump = DumpBuilder::new()
            .node("p", "Parent", None, &["s", "v", "d", "t"])
            .typed("s", "Search", Some("p"), DocType::Search, &[])
            .typed("v", "View", Some("p"), DocType::ViewDef, &[])
            .typed("d", "Data", Some("p"), DocType::AssociatedData, &[])
            .tuple("t", Some("p"), &["lonely"])
            .node("lonely", "Lonely", None, &[])
            .build();
        let index = NodeIndex::build(dump, Visualizer::default()).unwrap();

        assert!(index.content_of("p").is_empty());
        assert!(index.fields_of("p").is_empty());
        assert!(!index.master_pairs().iter().any(|link| link.source == "p"));
    }

    #[test]
    fn test_file_root_children_are_not_content() {
        let dump = DumpBuilder::new()
            .node("root", "Root node for file: workspace.json", None, &["x"])
            .node("x", "X", Some("root"), &[])
            .build();
        let index = NodeIndex::build(dump, Visualizer::default()).unwrap();
        assert!(index.content_of("root").is_empty());
    }

    #[test]
    fn test_missing_linkage_is_an_error() {
        let index = NodeIndex::build(people_dump().build(), Visualizer::default()).unwrap();
        assert_eq!(
            index.get_linkage_reason("c1", "alice"),
            Err(IndexError::missing_link("c1", "alice"))
        );
    }

    #[test]
    fn test_final_links_collapse_reverse_duplicates() {
        let dump = DumpBuilder::new()
            .node("a", "A", None, &[])
            .node("b", "B", None, &[])
            .node("x", r#"<span data-inlineref-node="a"></span><span data-inlineref-node="b"></span>"#, None, &[])
            .node("y", r#"<span data-inlineref-node="b"></span><span data-inlineref-node="a"></span>"#, None, &[])
            .build();
        let config = Visualizer {
            include_inline_ref_nodes: false,
            ..Visualizer::default()
        };
        let index = NodeIndex::build(dump, config).unwrap();

        assert_eq!(index.master_pairs().len(), 2);
        assert_eq!(
            index.final_links(),
            vec![Link::new("a", "b", LinkReason::IndirectReference)]
        );
    }
}
