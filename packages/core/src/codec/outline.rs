//! Tana paste outline to JSON tree
//!
//! Parsing runs in two passes. The first builds a raw tree from indentation:
//! every `- ` line becomes a node at depth `leading_spaces / 2 + 1`, lines
//! containing `::` become field nodes and fenced code blocks are collected
//! verbatim. The second pass hoists field nodes into the JSON object of their
//! parent:
//!
//! ```text
//! - Meeting                     [{ "name": "Meeting",
//!   - attendees:: Alice    =>      "attendees": "Alice",
//!   - Agenda                       "children": [{ "name": "Agenda" }] }]
//! ```
//!
//! A field with only field children becomes an object, a field with only
//! plain children becomes an array. A field that has an inline value and
//! children, or that mixes field and plain children, is rejected.

use crate::codec::error::CodecError;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Code fence marker
pub const FENCE: &str = "```";

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)-\s*(.*)$").unwrap());

const ROOT: usize = 0;

#[derive(Debug)]
struct RawNode {
    /// Node text, or the field name for field lines
    text: String,
    is_field: bool,
    value: Option<String>,
    depth: usize,
    /// 1-based source line
    line: usize,
    children: Vec<usize>,
}

impl RawNode {
    fn plain(text: impl Into<String>, depth: usize, line: usize) -> Self {
        Self {
            text: text.into(),
            is_field: false,
            value: None,
            depth,
            line,
            children: Vec::new(),
        }
    }

    fn field(name: &str, value: &str, depth: usize, line: usize) -> Self {
        let value = value.trim();
        Self {
            text: name.trim().to_string(),
            is_field: true,
            value: (!value.is_empty()).then(|| value.to_string()),
            depth,
            line,
            children: Vec::new(),
        }
    }
}

/// Arena of raw nodes plus the chain of open ancestors.
///
/// `stack` always starts with the synthetic root; its last entry is the most
/// recently attached node.
#[derive(Debug)]
struct RawTree {
    nodes: Vec<RawNode>,
    stack: Vec<usize>,
}

impl RawTree {
    fn new() -> Self {
        Self {
            nodes: vec![RawNode::plain("ROOT", 0, 0)],
            stack: vec![ROOT],
        }
    }

    fn current(&self) -> usize {
        self.stack.last().copied().unwrap_or(ROOT)
    }

    /// Attach under the nearest open node shallower than `node`
    fn attach(&mut self, node: RawNode) {
        while let Some(&top) = self.stack.last() {
            if top != ROOT && self.nodes[top].depth >= node.depth {
                self.stack.pop();
            } else {
                break;
            }
        }
        let parent = self.current();
        let index = self.nodes.len();
        self.nodes.push(node);
        self.nodes[parent].children.push(index);
        self.stack.push(index);
    }

    /// A code block is the value of an empty field directly above it,
    /// otherwise a plain node of its own
    fn attach_code_block(&mut self, block: String, depth: usize, line: usize) {
        let current = self.current();
        let node = &mut self.nodes[current];
        if node.is_field && node.value.is_none() && node.children.is_empty() && depth > node.depth
        {
            node.value = Some(block);
        } else {
            self.attach(RawNode::plain(block, depth, line));
        }
    }

    fn hoist(&self) -> Result<Vec<Value>, CodecError> {
        self.nodes[ROOT]
            .children
            .iter()
            .map(|&index| {
                let node = &self.nodes[index];
                if node.is_field {
                    let mut object = Map::new();
                    object.insert(node.text.clone(), self.hoist_field(index)?);
                    Ok(Value::Object(object))
                } else {
                    self.hoist_node(index)
                }
            })
            .collect()
    }

    fn hoist_node(&self, index: usize) -> Result<Value, CodecError> {
        let node = &self.nodes[index];
        let mut object = Map::new();
        object.insert("name".to_string(), Value::String(node.text.clone()));

        let mut children = Vec::new();
        for &child in &node.children {
            if self.nodes[child].is_field {
                object.insert(self.nodes[child].text.clone(), self.hoist_field(child)?);
            } else {
                children.push(self.hoist_node(child)?);
            }
        }
        if !children.is_empty() {
            object.insert("children".to_string(), Value::Array(children));
        }
        Ok(Value::Object(object))
    }

    fn hoist_field(&self, index: usize) -> Result<Value, CodecError> {
        let node = &self.nodes[index];
        if node.children.is_empty() {
            return Ok(node.value.clone().map_or(Value::Null, Value::String));
        }

        let conflict = || CodecError::field_with_value_and_children(&node.text, node.line);
        if node.value.is_some() {
            return Err(conflict());
        }

        let field_children = node
            .children
            .iter()
            .filter(|&&child| self.nodes[child].is_field)
            .count();

        if field_children == node.children.len() {
            let mut object = Map::new();
            for &child in &node.children {
                object.insert(self.nodes[child].text.clone(), self.hoist_field(child)?);
            }
            Ok(Value::Object(object))
        } else if field_children == 0 {
            node.children
                .iter()
                .map(|&child| self.hoist_node(child))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        } else {
            Err(conflict())
        }
    }
}

/// Parse Tana paste text into a list of JSON values, one per top-level line.
///
/// Plain top-level nodes become `{name, <fields>..., children}` objects;
/// top-level field lines become standalone `{field: value}` objects.
pub fn outline_to_tree(text: &str) -> Result<Vec<Value>, CodecError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut tree = RawTree::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim_end();
        let line_number = i + 1;
        i += 1;

        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed == "-" {
            continue;
        }
        let leading = line.len() - trimmed.len();
        let depth = leading / 2 + 1;

        if trimmed.starts_with(FENCE) {
            let mut block = format!("{trimmed}\n");
            let closed_inline = trimmed
                .strip_prefix(FENCE)
                .is_some_and(|rest| rest.contains(FENCE));

            if !closed_inline {
                let mut closed = false;
                while i < lines.len() {
                    let code_line = lines[i];
                    i += 1;
                    block.push_str(strip_indent(code_line, leading));
                    block.push('\n');
                    if code_line.trim_start().starts_with(FENCE) {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(CodecError::UnterminatedCodeBlock { line: line_number });
                }
            }

            tree.attach_code_block(block, depth, line_number);
            continue;
        }

        let content = LINE_RE
            .captures(line)
            .and_then(|caps| caps.get(2))
            .map_or(trimmed, |m| m.as_str());

        let node = match content.split_once("::") {
            Some((name, value)) => RawNode::field(name, value, depth, line_number),
            None => RawNode::plain(content, depth, line_number),
        };
        tree.attach(node);
    }

    tree.hoist()
}

/// Remove up to `width` leading spaces
fn strip_indent(line: &str, width: usize) -> &str {
    let spaces = line.len() - line.trim_start_matches(' ').len();
    &line[spaces.min(width)..]
}

#[cfg(test)]
#[path = "outline_test.rs"]
mod outline_test;
