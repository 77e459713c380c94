//! Topic extraction settings

use crate::models::Visualizer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Deepest content expansion allowed below a topic
pub const MAX_DEPTH_LIMIT: usize = 64;

/// Content expansion depth used when none is configured
pub const DEFAULT_DEPTH_LIMIT: usize = 10;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown field format '{0}': expected TANA, JSON, outline or structured")]
    UnknownFieldMode(String),

    #[error("depth_limit must be between 1 and {max}, got {value}")]
    DepthLimitOutOfRange { value: usize, max: usize },
}

/// How field values are attached to a topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldMode {
    /// Render fields as `field:: value` lines inside the content outline
    #[default]
    Outline,
    /// Attach fields as structured [`TanaField`](crate::models::TanaField) records
    Structured,
}

impl FromStr for FieldMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tana" | "outline" => Ok(FieldMode::Outline),
            "json" | "structured" => Ok(FieldMode::Structured),
            _ => Err(ConfigError::UnknownFieldMode(s.to_string())),
        }
    }
}

impl fmt::Display for FieldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldMode::Outline => f.write_str("outline"),
            FieldMode::Structured => f.write_str("structured"),
        }
    }
}

/// Configuration for [`TopicExtractor`](crate::services::TopicExtractor)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub field_mode: FieldMode,

    /// Levels of owned content expanded below each topic
    pub depth_limit: usize,

    /// Link selection used while indexing the dump
    pub visualizer: Visualizer,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            field_mode: FieldMode::Outline,
            depth_limit: DEFAULT_DEPTH_LIMIT,
            visualizer: Visualizer::topics(),
        }
    }
}

impl ExtractorConfig {
    pub fn with_field_mode(mut self, field_mode: FieldMode) -> Self {
        self.field_mode = field_mode;
        self
    }

    pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth_limit == 0 || self.depth_limit > MAX_DEPTH_LIMIT {
            return Err(ConfigError::DepthLimitOutOfRange {
                value: self.depth_limit,
                max: MAX_DEPTH_LIMIT,
            });
        }
        Ok(())
    }
}
