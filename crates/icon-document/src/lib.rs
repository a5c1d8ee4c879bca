//! Document model and collaborator seams for the host design document.
//!
//! This crate defines the shape of the document tree the labeling tool works
//! against, without owning the document itself:
//!
//! - [`NodeId`], [`NodeKind`], [`NodeRecord`]: snapshot views of nodes
//! - [`DocumentTree`], [`NodeMutator`]: read/write seams onto the host tree
//! - [`KeyValueStore`]: document-session scoped persistence
//! - [`IconExporter`]: node-to-bitmap rendering seam
//! - [`MemoryDocument`], [`MemoryKeyValueStore`]: in-memory reference
//!   implementations used by tests and the offline CLI
//! - [`FsKeyValueStore`]: filesystem-backed store so cached state survives
//!   process restarts within a document session

pub mod fs_store;
pub mod memory;
pub mod node;
pub mod traits;

pub use fs_store::FsKeyValueStore;
pub use memory::{DocumentSnapshot, MemoryDocument, MemoryKeyValueStore, NodeSnapshot};
pub use node::{NodeId, NodeKind, NodeRecord};
pub use traits::{DocumentTree, IconExporter, KeyValueStore, NodeMutator};
