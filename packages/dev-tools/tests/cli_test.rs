//! CLI Tests
//!
//! Runs the `tana-helper` binary against the core crate's sample dump and
//! temporary outline files.

use anyhow::Result;
use serde_json::{json, Value};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

fn sample_dump() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../core/tests/fixtures/sample_dump.json")
}

fn tana_helper(args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_tana-helper"))
        .args(args)
        .output()?)
}

fn tana_helper_stdin(args: &[&str], input: &str) -> Result<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tana-helper"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())?;
    Ok(child.wait_with_output()?)
}

fn stdout_json(output: &Output) -> Result<Value> {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn test_topics_structured_fields() -> Result<()> {
    let dump = sample_dump();
    let output = tana_helper(&["topics", dump.to_str().unwrap(), "--format", "json"])?;
    let topics = stdout_json(&output)?;

    let ids: Vec<&str> = topics
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["proj1", "ann"]);
    assert_eq!(topics[0]["fields"][0]["name"], "Status");
    assert_eq!(topics[0]["fields"][0]["value"], "Active");
    Ok(())
}

#[test]
fn test_topics_outline_fields_by_default() -> Result<()> {
    let dump = sample_dump();
    let topics = stdout_json(&tana_helper(&["topics", dump.to_str().unwrap()])?)?;

    assert_eq!(topics[0]["fields"], Value::Null);
    assert_eq!(topics[0]["content"][1]["content"], "  - Status:: Active");
    Ok(())
}

#[test]
fn test_topics_rejects_depth_limit_out_of_range() -> Result<()> {
    let dump = sample_dump();
    let output = tana_helper(&["topics", dump.to_str().unwrap(), "--depth-limit", "0"])?;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid extractor options"));
    Ok(())
}

#[test]
fn test_graph_and_classes() -> Result<()> {
    let dump = sample_dump();
    let graph = stdout_json(&tana_helper(&["graph", dump.to_str().unwrap()])?)?;
    assert_eq!(graph["directed"], false);
    assert!(graph["links"]
        .as_array()
        .unwrap()
        .iter()
        .any(|l| l["source"] == "proj1" && l["target"] == "tag_project"));

    let output = tana_helper(&["classes", dump.to_str().unwrap(), "--mermaid"])?;
    assert!(output.status.success());
    let mermaid = String::from_utf8(output.stdout)?;
    assert!(mermaid.contains("classDiagram"));
    assert!(mermaid.contains("    tag_entity <|-- tag_project\n"));
    Ok(())
}

#[test]
fn test_jsonify_file_then_tanify_stdin() -> Result<()> {
    let mut outline = NamedTempFile::new()?;
    write!(outline, "- Meeting\n  - date:: today\n  - Agenda\n")?;

    let tree = stdout_json(&tana_helper(&[
        "jsonify",
        outline.path().to_str().unwrap(),
    ])?)?;
    assert_eq!(
        tree,
        json!([{"name": "Meeting", "date": "today", "children": [{"name": "Agenda"}]}])
    );

    let fenced = format!("```json\n{tree}\n```\n");
    let output = tana_helper_stdin(&["tanify", "-"], &fenced)?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "- Meeting\n  - date:: today\n  - Agenda\n"
    );
    Ok(())
}

#[test]
fn test_context_from_stdin() -> Result<()> {
    let context = "- Weekly sync #meeting\n  - Owner:: [[Ann^ann]]\n  - Notes\n";
    let topic = stdout_json(&tana_helper_stdin(&["context", "n1", "-"], context)?)?;

    assert_eq!(topic["id"], "n1");
    assert_eq!(topic["tags"], json!(["meeting"]));
    assert_eq!(topic["fields"][0]["value_id"], "ann");
    Ok(())
}

#[test]
fn test_missing_input_reports_path() -> Result<()> {
    let output = tana_helper(&["graph", "/nonexistent/dump.json"])?;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("/nonexistent/dump.json"));
    Ok(())
}
