//! Shared helpers for integration tests

use anyhow::{Context, Result};
use std::path::PathBuf;
use tana_helper_core::models::TanaDump;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load and parse a dump from `tests/fixtures`
pub fn load_dump(name: &str) -> Result<TanaDump> {
    let path = fixture_path(name);
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading fixture {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing fixture {}", path.display()))
}
