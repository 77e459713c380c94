//! Tana Helper CLI
//!
//! Feeds Tana dumps and Tana paste outlines through `tana-helper-core` and
//! prints the result on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Tagged topics from a workspace export
//! cargo run --bin tana-helper -- topics dump.json --format json --depth-limit 5
//!
//! # Link graph, honouring the dump's own `visualize` block
//! cargo run --bin tana-helper -- graph dump.json --pretty
//!
//! # Supertag hierarchy as a Mermaid class diagram
//! cargo run --bin tana-helper -- classes dump.json --mermaid
//!
//! # Tana paste <-> JSON
//! pbpaste | cargo run --bin tana-helper -- jsonify -
//! cargo run --bin tana-helper -- tanify tree.json
//!
//! # Topic from a pasted node context
//! cargo run --bin tana-helper -- context abc123 context.txt
//! ```
//!
//! Set `RUST_LOG=tana_helper_core=debug` for indexing details.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tana_helper_core::codec::{jsonify, tanify};
use tana_helper_core::{
    class_diagram, extract_topic_from_context, mermaid_classes, render_graph, ExtractorConfig,
    FieldMode, TanaDump, TopicExtractor,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Tana dump and Tana paste helper")]
struct Args {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract tagged topics from a dump
    Topics {
        /// Dump file, or `-` for stdin
        input: PathBuf,
        /// Field rendering: `tana` (outline lines) or `json` (structured fields)
        #[arg(long, default_value = "tana")]
        format: FieldMode,
        /// Maximum nesting of owned content
        #[arg(long)]
        depth_limit: Option<usize>,
    },
    /// Render the link graph of a dump
    Graph {
        /// Dump file, or `-` for stdin
        input: PathBuf,
    },
    /// Render the supertag class hierarchy of a dump
    Classes {
        /// Dump file, or `-` for stdin
        input: PathBuf,
        /// Emit a Mermaid class diagram instead of JSON
        #[arg(long)]
        mermaid: bool,
    },
    /// Convert Tana paste to a JSON tree
    Jsonify {
        /// Outline file, or `-` for stdin
        input: PathBuf,
    },
    /// Convert JSON (optionally inside a ```json fence) to Tana paste
    Tanify {
        /// JSON file, or `-` for stdin
        input: PathBuf,
    },
    /// Build a topic from a pasted node context
    Context {
        /// Id of the node the context belongs to
        node_id: String,
        /// Context file, or `-` for stdin
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = run(args.cmd, args.pretty)?;
    print!("{output}");
    Ok(())
}

fn run(cmd: Command, pretty: bool) -> Result<String> {
    match cmd {
        Command::Topics {
            input,
            format,
            depth_limit,
        } => {
            let mut config = ExtractorConfig::default().with_field_mode(format);
            if let Some(depth_limit) = depth_limit {
                config = config.with_depth_limit(depth_limit);
            }
            let extractor = TopicExtractor::new(config).context("invalid extractor options")?;
            let topics = extractor
                .extract(load_dump(&input)?)
                .context("topic extraction failed")?;
            info!("extracted {} topics", topics.len());
            emit(&topics, pretty)
        }
        Command::Graph { input } => {
            let graph = render_graph(load_dump(&input)?).context("graph rendering failed")?;
            info!(
                "graph has {} nodes and {} links",
                graph.nodes.len(),
                graph.links.len()
            );
            emit(&graph, pretty)
        }
        Command::Classes { input, mermaid } => {
            let graph = class_diagram(load_dump(&input)?).context("class diagram failed")?;
            if mermaid {
                Ok(mermaid_classes(&graph))
            } else {
                emit(&graph, pretty)
            }
        }
        Command::Jsonify { input } => {
            let tree = jsonify(&read_input(&input)?).context("invalid Tana paste")?;
            emit(&tree, pretty)
        }
        Command::Tanify { input } => tanify(&read_input(&input)?).context("invalid JSON input"),
        Command::Context { node_id, input } => {
            let topic = extract_topic_from_context(&node_id, &read_input(&input)?);
            emit(&topic, pretty)
        }
    }
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let mut json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    json.push('\n');
    Ok(json)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn load_dump(path: &Path) -> Result<TanaDump> {
    let text = read_input(path)?;
    serde_json::from_str(&text).with_context(|| format!("parsing dump {}", path.display()))
}
