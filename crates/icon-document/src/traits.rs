//! Collaborator seams onto the host document and its storage.
//!
//! The host application owns the real scene graph, node mutation, and
//! per-session storage; everything in this workspace talks to it through
//! these traits so the logic stays testable against [`crate::MemoryDocument`].

use anyhow::Result;

use crate::node::{NodeId, NodeRecord};

/// Read access to the host document tree.
pub trait DocumentTree: Send + Sync {
    /// Id of the page currently in scope.
    fn current_page(&self) -> Result<NodeId>;

    /// Direct children of a node, in document order.
    ///
    /// Children that no longer exist are omitted; an unknown parent is an
    /// error.
    fn children_of(&self, id: &NodeId) -> Result<Vec<NodeRecord>>;

    /// Locate a live node by id.
    fn find_node(&self, id: &NodeId) -> Option<NodeRecord>;

    /// Node-scoped plugin data stored under `key`, if any.
    fn plugin_data(&self, id: &NodeId, key: &str) -> Option<String>;
}

/// Write access to nodes.
pub trait NodeMutator: Send + Sync {
    /// Set a node's native description field.
    fn set_description(&self, id: &NodeId, text: &str) -> Result<()>;

    /// Set node-scoped plugin data under `key`.
    fn set_plugin_data(&self, id: &NodeId, key: &str, value: &str) -> Result<()>;

    /// Set the relaunch metadata surfaced when the document is reopened.
    fn set_relaunch_description(&self, id: &NodeId, text: &str) -> Result<()>;

    /// Whether the host exposes relaunch metadata at all.
    fn supports_relaunch_data(&self) -> bool {
        true
    }
}

/// Document-session scoped key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Renders a node to an encoded bitmap.
pub trait IconExporter: Send + Sync {
    /// Export the node as PNG bytes at the given scale factor.
    fn export_png(&self, id: &NodeId, scale: f32) -> Result<Vec<u8>>;
}
