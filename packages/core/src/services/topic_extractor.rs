//! Topic Extractor
//!
//! Walks a built [`NodeIndex`] and produces one [`TopicDocument`] per tagged
//! node. A topic carries its tags, its fields (structured or as outline
//! lines, see [`FieldMode`]) and a depth-limited outline of its owned content.
//!
//! Content expansion only recurses into owned, untagged children. Tagged
//! children and child references are emitted as `[[name^id]]` reference lines
//! instead, so a topic never duplicates another topic's content and heavily
//! cross-referenced nodes (day pages) do not blow up the outline.

use crate::config::{ConfigError, ExtractorConfig, FieldMode};
use crate::index::{IndexError, NodeIndex};
use crate::models::{ContentElement, LinkReason, TanaDump, TanaField, TopicDocument};
use crate::utils::patch_node_name;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct TopicExtractor {
    config: ExtractorConfig,
}

impl TopicExtractor {
    pub fn new(config: ExtractorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Index `dump` with the configured link selection and extract its topics
    pub fn extract(&self, dump: TanaDump) -> Result<Vec<TopicDocument>, IndexError> {
        let index = NodeIndex::build(dump, self.config.visualizer)?;
        self.extract_from_index(&index)
    }

    /// Extract topics from an already built index.
    ///
    /// Topic roots are the sources of tag-application links, in link order,
    /// each emitted once.
    pub fn extract_from_index(&self, index: &NodeIndex) -> Result<Vec<TopicDocument>, IndexError> {
        let mut seen = HashSet::new();
        let mut topics = Vec::new();

        for link in index.final_links() {
            if link.reason != LinkReason::TagApplication || !seen.insert(link.source.clone()) {
                continue;
            }
            topics.push(self.topic(index, &link.source)?);
        }

        tracing::debug!("Extracted {} topics", topics.len());
        Ok(topics)
    }

    fn topic(&self, index: &NodeIndex, topic_id: &str) -> Result<TopicDocument, IndexError> {
        let node = index.node(topic_id)?;
        let name = patch_node_name(index, topic_id);

        let mut content = vec![ContentElement::text(
            Some(topic_id.to_string()),
            format!("- {name}"),
        )];
        let mut fields = Vec::new();
        let mut folded = false;

        for entry in index.fields_of(topic_id) {
            let field_name = index.name_of(&entry.field).to_string();
            let mut values = Vec::new();

            for value_id in &entry.values {
                if !index.valid(value_id) {
                    tracing::warn!(
                        "Invalid field value {} for field {}, presumably trashed",
                        value_id,
                        entry.field
                    );
                    continue;
                }
                let value = render_value(index, value_id);
                if self.config.field_mode == FieldMode::Structured && !value.is_empty() {
                    fields.push(TanaField {
                        field_id: entry.field.clone(),
                        value_id: value_id.clone(),
                        name: field_name.clone(),
                        value: value.clone(),
                    });
                }
                values.push(value);
            }

            if self.config.field_mode == FieldMode::Outline {
                if let Some((first, rest)) = values.split_first() {
                    if !first.is_empty() {
                        folded = true;
                        content.push(ContentElement::field(
                            &field_name,
                            format!("  - {field_name}:: {first}"),
                        ));
                        for value in rest {
                            content.push(ContentElement::field(
                                &field_name,
                                format!("    - {value}"),
                            ));
                        }
                    }
                }
            }
        }

        content.extend(self.recurse_content(index, topic_id, self.config.depth_limit)?);

        Ok(TopicDocument {
            id: topic_id.to_string(),
            name,
            description: node.props.description.clone(),
            tags: tag_list(index, index.tags_of(topic_id)),
            // outline mode: null once fields are folded into content
            fields: match self.config.field_mode {
                FieldMode::Structured => Some(fields),
                FieldMode::Outline if folded => None,
                FieldMode::Outline => Some(Vec::new()),
            },
            content,
        })
    }

    /// Outline lines for the content of `parent_id`.
    ///
    /// `remaining` counts the levels still allowed below this one; lines at
    /// `remaining == 0` are emitted but not expanded. Indentation is two
    /// spaces per level below the topic.
    pub fn recurse_content(
        &self,
        index: &NodeIndex,
        parent_id: &str,
        remaining: usize,
    ) -> Result<Vec<ContentElement>, IndexError> {
        let depth = self.config.depth_limit.saturating_sub(remaining) + 1;
        let indent = "  ".repeat(depth);
        let mut content = Vec::new();

        for content_id in index.content_of(parent_id) {
            let reason = index.get_linkage_reason(parent_id, content_id)?;
            let tags = index.tags_of(content_id);
            let name = patch_node_name(index, content_id);

            if reason == LinkReason::ChildContent && tags.is_empty() {
                content.push(ContentElement::text(
                    Some(content_id.clone()),
                    format!("{indent}- {name}"),
                ));
                if remaining > 0 {
                    content.extend(self.recurse_content(index, content_id, remaining - 1)?);
                }
            } else {
                content.push(ContentElement::reference(
                    Some(content_id.clone()),
                    format!("{indent}- [[{name}^{content_id}]]{}", add_tags(index, tags)),
                ));
            }
        }

        Ok(content)
    }
}

/// Field value display: tagged values are references, others plain text
fn render_value(index: &NodeIndex, value_id: &str) -> String {
    let tags = index.tags_of(value_id);
    let name = patch_node_name(index, value_id);
    if tags.is_empty() {
        name
    } else {
        format!("[[{name}^{value_id}]]{}", add_tags(index, tags))
    }
}

/// Tag display names: `#name`, or `[[#multi word name]]`
pub fn tag_list(index: &NodeIndex, tag_ids: &[String]) -> Vec<String> {
    tag_ids
        .iter()
        .map(|tag_id| {
            let name = index.name_of(tag_id);
            if name.contains(char::is_whitespace) {
                format!("[[#{name}]]")
            } else {
                format!("#{name}")
            }
        })
        .collect()
}

/// Tags as a suffix for a rendered line, with a leading space
pub fn add_tags(index: &NodeIndex, tag_ids: &[String]) -> String {
    if tag_ids.is_empty() {
        return String::new();
    }
    format!(" {}", tag_list(index, tag_ids).join(" "))
}

#[cfg(test)]
#[path = "topic_extractor_test.rs"]
mod topic_extractor_test;
