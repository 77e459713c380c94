//! Inline reference markup in node names
//!
//! Tana stores references inside a name as empty HTML spans:
//!
//! - `<span data-inlineref-node="ID"></span>` points at another node
//! - `<span data-inlineref-date="{&quot;dateTimeString&quot;:&quot;2024-01-05&quot;}"></span>`
//!   embeds a date
//!
//! Before rendering, node references are expanded to `[[name^id]]` so that
//! names read naturally and stay searchable.

use crate::index::NodeIndex;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Marker that opens a node reference span
pub const INLINE_REF_NODE: &str = "<span data-inlineref-node=\"";

/// Any node reference, closed or not (used for link extraction)
static NODE_REF_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<span data-inlineref-node="([^"]*)""#).unwrap());

/// A complete node reference span (used for substitution)
static NODE_REF_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<span data-inlineref-node="([^"]*)"></span>"#).unwrap());

static DATE_REF_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<span data-inlineref-date="([^"]*)"></span>"#).unwrap());

/// Ids referenced inline by a name, in order of appearance
pub fn inline_ref_ids(name: &str) -> Vec<&str> {
    if !name.contains(INLINE_REF_NODE) {
        return Vec::new();
    }
    NODE_REF_ID_RE
        .captures_iter(name)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Display name of `node_id` with inline references expanded.
///
/// Node references to valid nodes become `[[name^id]]`; references to missing
/// or trashed nodes are left exactly as they were. Date references become the
/// date they carry. Returns the empty string for unknown or unnamed nodes.
pub fn patch_node_name(index: &NodeIndex, node_id: &str) -> String {
    patch_name(index, index.name_of(node_id))
}

/// Expand inline references inside an arbitrary name
pub fn patch_name(index: &NodeIndex, name: &str) -> String {
    let mut patched = name.to_string();

    if patched.contains(INLINE_REF_NODE) {
        patched = NODE_REF_SPAN_RE
            .replace_all(&patched, |caps: &Captures| {
                let ref_id = &caps[1];
                if index.valid(ref_id) {
                    format!("[[{}^{}]]", index.name_of(ref_id), ref_id)
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned();
    }

    if patched.contains("<span data-inlineref-date") {
        patched = expand_date_refs(&patched);
    }

    patched
}

/// Replace date reference spans and HTML-unescape the text around them.
///
/// Each segment is decoded once, so an escaped entity inside a date payload
/// is not decoded twice.
fn expand_date_refs(name: &str) -> String {
    let mut expanded = String::with_capacity(name.len());
    let mut last = 0;
    for caps in DATE_REF_SPAN_RE.captures_iter(name) {
        let (Some(span), Some(payload)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        expanded.push_str(&unescape_html(&name[last..span.start()]));
        expanded.push_str(&date_ref_text(payload.as_str()));
        last = span.end();
    }
    expanded.push_str(&unescape_html(&name[last..]));
    expanded
}

/// Text for a date reference payload: its `dateTimeString` when the payload is
/// a JSON object carrying one, the unescaped payload otherwise
fn date_ref_text(payload: &str) -> String {
    let unescaped = unescape_html(payload);
    serde_json::from_str::<serde_json::Value>(&unescaped)
        .ok()
        .and_then(|value| {
            value
                .get("dateTimeString")
                .and_then(|d| d.as_str())
                .map(str::to_string)
        })
        .unwrap_or(unescaped)
}

/// Decode the entities Tana emits inside attribute values
pub fn unescape_html(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
