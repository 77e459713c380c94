//! JSON tree to Tana paste outline
//!
//! Inverse of [`outline_to_tree`](crate::codec::outline_to_tree). An object's
//! `name` becomes its own line, every other key becomes a nested
//! `key:: value` field and `children` are rendered last, one level below the
//! name.

use crate::codec::outline::FENCE;
use serde_json::{Map, Value};

/// Render a JSON value (or list of values) as Tana paste text
pub fn tree_to_outline(tree: &Value) -> String {
    let mut out = String::new();
    render_value(tree, 0, &mut out);
    out
}

fn render_value(value: &Value, indent: usize, out: &mut String) {
    match value {
        Value::Array(items) => {
            for item in items {
                render_value(item, indent, out);
            }
        }
        Value::Object(object) => render_object(object, indent, out),
        Value::String(text) => render_name(text, indent, out),
        Value::Null => {}
        other => push_line(out, indent, &format!("- {other}")),
    }
}

fn render_object(object: &Map<String, Value>, indent: usize, out: &mut String) {
    let mut indent = indent;
    match object.get("name") {
        None | Some(Value::Null) => {}
        Some(Value::String(name)) => {
            render_name(name, indent, out);
            indent += 2;
        }
        Some(other) => {
            push_line(out, indent, &format!("- {other}"));
            indent += 2;
        }
    }

    for (key, value) in object {
        if key == "name" || key == "children" {
            continue;
        }
        render_field(key, value, indent, out);
    }

    if let Some(children) = object.get("children") {
        render_value(children, indent, out);
    }
}

fn render_field(key: &str, value: &Value, indent: usize, out: &mut String) {
    let header = format!("- {key}::");
    match value {
        Value::String(text) if is_code_block(text) => {
            push_line(out, indent, &header);
            render_code_block(text, indent + 2, out);
        }
        Value::String(text) if text.is_empty() => push_line(out, indent, &header),
        Value::String(text) => push_line(out, indent, &format!("{header} {text}")),
        Value::Null => push_line(out, indent, &header),
        Value::Array(items) => {
            push_line(out, indent, &header);
            for item in items {
                render_value(item, indent + 2, out);
            }
        }
        Value::Object(object) => {
            push_line(out, indent, &header);
            render_object(object, indent + 2, out);
        }
        other => push_line(out, indent, &format!("{header} {other}")),
    }
}

fn render_name(name: &str, indent: usize, out: &mut String) {
    if is_code_block(name) {
        render_code_block(name, indent, out);
    } else {
        push_line(out, indent, &format!("- {name}"));
    }
}

/// Code blocks are written line by line without bullets; blank lines stay
/// blank so the block reads back verbatim
fn render_code_block(block: &str, indent: usize, out: &mut String) {
    let body = block.strip_suffix('\n').unwrap_or(block);
    for line in body.split('\n') {
        if line.is_empty() {
            out.push('\n');
        } else {
            push_line(out, indent, line);
        }
    }
}

/// Parsed code blocks always end in a newline; single-line text that merely
/// starts with a fence stays an ordinary bulleted line
fn is_code_block(text: &str) -> bool {
    text.starts_with(FENCE) && text.contains('\n')
}

fn push_line(out: &mut String, indent: usize, line: &str) {
    out.extend(std::iter::repeat(' ').take(indent));
    out.push_str(line);
    out.push('\n');
}
