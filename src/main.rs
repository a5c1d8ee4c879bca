//! Offline inspection CLI for icon index and variant resolution.
//!
//! Operates on a JSON document snapshot instead of a live host document, so
//! index building, variant matching, and propagation can be exercised and
//! debugged outside the host:
//!
//! - `index`: build (or reuse) the index for the snapshot's first page
//! - `variants --id <node>`: show every size variant of a node
//! - `describe --id <node> --text <t>`: propagate a description update

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use icon_atlas::args::{Args, Command};
use icon_atlas::IconAtlas;
use icon_document::{DocumentSnapshot, FsKeyValueStore, MemoryDocument, NodeId};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let raw = fs::read_to_string(&args.document)
        .with_context(|| format!("Failed to read {}", args.document.display()))?;
    let snapshot = DocumentSnapshot::from_json(&raw)?;
    let document = Arc::new(MemoryDocument::from_snapshot(&snapshot)?);

    let cache_dir = args.cache_dir.unwrap_or_else(|| {
        args.document
            .parent()
            .map(|p| p.join(".icon-atlas"))
            .unwrap_or_else(|| ".icon-atlas".into())
    });
    let store = Arc::new(FsKeyValueStore::new(&cache_dir)?);

    let atlas = IconAtlas::new(document.clone(), document, store);

    match args.command {
        Command::Index => {
            let index = atlas.index()?;
            println!(
                "index of page {} ({} entries, built {})",
                index.scope_id,
                index.len(),
                index.built_at.to_rfc3339()
            );
            for entry in &index.entries {
                let size = entry
                    .size
                    .map(|s| format!("{}x{}", s.width, s.height))
                    .unwrap_or_else(|| "-".to_string());
                let described = if entry.has_description { "yes" } else { "no" };
                println!(
                    "  {:<12} {:<8} described={}  {}",
                    entry.id, size, described, entry.name
                );
            }
        }
        Command::Variants { id } => {
            let set = atlas.resolve_variants(&NodeId::new(id))?;
            println!("{} variant(s) for key \"{}\"", set.len(), set.key);
            for entry in &set.entries {
                let size = entry
                    .size
                    .map(|s| format!("{}x{}", s.width, s.height))
                    .unwrap_or_else(|| "-".to_string());
                println!("  {:<12} {:<8} {}", entry.id, size, entry.name);
                if entry.has_description {
                    println!("               {}", entry.description.replace('\n', " | "));
                }
            }
        }
        Command::Describe { id, text } => {
            let result = atlas.update_description(&NodeId::new(id), &text)?;
            println!(
                "attempted={} updated={} not_found={}",
                result.attempted, result.updated, result.not_found
            );
            if let Some(error) = &result.first_error {
                println!("first error: {}", error);
            }
        }
    }

    Ok(())
}
