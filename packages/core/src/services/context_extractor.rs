//! Topics from pasted outline context
//!
//! When a node arrives as Tana paste text (its name followed by its nested
//! content) rather than as part of a dump, there is no index to consult. The
//! helpers here recover what they can from the text itself: tags from the
//! name, `field:: value` lines and `[[name^id]]` references.

use crate::models::{ContentElement, TanaField, TopicDocument};
use regex::Regex;
use std::sync::LazyLock;

/// A line that is nothing but a node reference: `- [[name^id]]`
static REFERENCE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*- \[\[.*\^.*\]\]").unwrap());

/// Reference at the start of a line or value, capturing the last id
static REFERENCE_CONTENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:-\s*)?\[\[.*\^([\w-]+)\]\]").unwrap());

static NODE_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\^([\w-]+)\]\]").unwrap());

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\[\[([^\]]+)\]\]|#([\w-]+)").unwrap());

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*-\s*(.*)$").unwrap());

/// Drop everything nested below reference lines.
///
/// Referenced nodes are extracted on their own, so their content is not
/// repeated inside the context of every node that points at them. The
/// reference lines themselves are kept.
pub fn prune_reference_nodes(context: &str) -> String {
    let mut result = String::new();
    let mut prune_below: Option<usize> = None;

    for line in context.lines() {
        let indent = line.len() - line.trim_start().len();
        if let Some(limit) = prune_below {
            if indent >= limit {
                continue;
            }
            prune_below = None;
        }

        result.push_str(line);
        result.push('\n');

        if REFERENCE_LINE_RE.is_match(line) {
            prune_below = Some(indent + 2);
        }
    }

    result
}

/// Tag names in a node name: `#tag` and `#[[multi word tag]]`
pub fn tags_from_name(name: &str) -> Vec<String> {
    TAG_RE
        .captures_iter(name)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Every node id referenced as `[[...^id]]`, nested references included
pub fn node_ids_from_text(text: &str) -> Vec<&str> {
    NODE_ID_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// The referenced id when `line` starts with a `[[name^id]]` reference
pub fn is_reference_content(line: &str) -> Option<&str> {
    REFERENCE_CONTENT_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn strip_bullet(line: &str) -> &str {
    BULLET_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map_or(line.trim(), |m| m.as_str().trim())
}

/// Build a topic from a node id and its pasted context.
///
/// The first line names the topic. `field:: value` lines become fields
/// (with the value id when the value is a reference); every other line is
/// kept as a content element.
pub fn extract_topic_from_context(node_id: &str, context: &str) -> TopicDocument {
    let pruned = prune_reference_nodes(context);
    let mut lines = pruned.lines().filter(|line| !line.trim().is_empty());

    let name = lines.next().map(strip_bullet).unwrap_or_default().to_string();
    let mut content = vec![ContentElement::text(
        Some(node_id.to_string()),
        format!("- {name}"),
    )];
    let mut fields = Vec::new();

    for line in lines {
        if let Some((field_name, value)) = line.split_once("::") {
            let value = value.trim();
            fields.push(TanaField {
                field_id: String::new(),
                value_id: is_reference_content(value).unwrap_or_default().to_string(),
                name: strip_bullet(field_name).to_string(),
                value: value.to_string(),
            });
        } else if let Some(ref_id) = is_reference_content(line) {
            content.push(ContentElement::reference(Some(ref_id.to_string()), line));
        } else {
            content.push(ContentElement::text(None, line));
        }
    }

    TopicDocument {
        id: node_id.to_string(),
        tags: tags_from_name(&name),
        name,
        description: None,
        fields: Some(fields),
        content,
    }
}
