//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Offline icon index inspection over a document snapshot.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Path to a document snapshot JSON file.
    #[arg(long, value_name = "PATH")]
    pub document: PathBuf,

    /// Directory for the persisted index cache.
    ///
    /// Defaults to `.icon-atlas/` next to the snapshot; reused across runs
    /// so the freshness window behaves as it would in the host.
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build (or reuse) the icon index and print its entries.
    Index,
    /// Resolve the size variants of a node.
    Variants {
        /// Node id to resolve.
        #[arg(long, value_name = "ID")]
        id: String,
    },
    /// Propagate a description to a node and all its size variants.
    Describe {
        /// Node id to update.
        #[arg(long, value_name = "ID")]
        id: String,
        /// New description text.
        #[arg(long, value_name = "TEXT")]
        text: String,
    },
}
