//! `quarry` CLI — canonicalize, hash, and path-resolve JSON documents using
//! the quarry value model.
//!
//! ## Usage
//!
//! ```sh
//! # Canonicalize JSON (stdin → stdout): deterministic key order
//! echo '{"b":2,"a":1}' | quarry canon
//!
//! # Canonicalize from file to file
//! quarry canon -i data.json -o data.canon.json
//!
//! # Print the content digest of a document
//! echo '{"b":2,"a":1}' | quarry hash
//!
//! # Resolve a dotted path (all-digit segments index into arrays)
//! echo '{"items":[{"name":"first"}]}' | quarry get --path items.0.name
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quarry_values::{Segment, Value};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "quarry", version, about = "Inspect quarry runtime values")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite JSON into canonical form (lexicographic object keys)
    Canon {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the content digest of a JSON document as hex
    Hash {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Resolve a dotted path and print the value at it in canonical form
    Get {
        /// Dotted path, e.g. `items.0.name`; all-digit segments are indices
        #[arg(long)]
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Canon { input, output } => {
            let value = read_value(input.as_deref())?;
            let canonical =
                serde_json::to_string(&value).context("Failed to serialize canonical form")?;
            write_output(output.as_deref(), &canonical)?;
        }
        Commands::Hash { input } => {
            let value = read_value(input.as_deref())?;
            println!("{:016x}", value.digest());
        }
        Commands::Get {
            path,
            input,
            output,
        } => {
            let value = read_value(input.as_deref())?;
            let segments = parse_path(&path);
            let found = value
                .get_in(&segments)
                .with_context(|| format!("Failed to resolve path `{path}`"))?;
            let canonical =
                serde_json::to_string(found).context("Failed to serialize canonical form")?;
            write_output(output.as_deref(), &canonical)?;
        }
    }

    Ok(())
}

/// Split a dotted path into segments. An all-digit segment (with an
/// optional leading minus, so invalid indices still reach the typed error)
/// addresses an array index; everything else is an object key.
fn parse_path(raw: &str) -> Vec<Segment> {
    raw.split('.')
        .filter(|part| !part.is_empty())
        .map(|part| match part.parse::<i64>() {
            Ok(index) => Segment::Index(index),
            Err(_) => Segment::from(part),
        })
        .collect()
}

fn read_value(path: Option<&str>) -> Result<Value> {
    let text = read_input(path)?;
    let json: serde_json::Value =
        serde_json::from_str(&text).context("Input is not valid JSON")?;
    Ok(Value::from(json))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
