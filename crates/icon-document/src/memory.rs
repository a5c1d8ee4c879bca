//! In-memory reference document used by tests and the offline CLI.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::node::{NodeId, NodeKind, NodeRecord};
use crate::traits::{DocumentTree, KeyValueStore, NodeMutator};

/// Serde form of a document: pages of nested nodes.
///
/// This is the shape the CLI loads from disk; it mirrors how the host
/// document nests children under containers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub pages: Vec<NodeSnapshot>,
}

impl DocumentSnapshot {
    /// Parse a snapshot from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| anyhow!("Failed to parse document snapshot: {}", e))
    }
}

/// One node in a [`DocumentSnapshot`], with nested children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_component: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub plugin_data: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct StoredNode {
    record: NodeRecord,
    children: Vec<NodeId>,
    plugin_data: HashMap<String, String>,
    relaunch_description: Option<String>,
}

#[derive(Debug, Default)]
struct Inner {
    nodes: HashMap<NodeId, StoredNode>,
    pages: Vec<NodeId>,
    current_page: Option<NodeId>,
}

/// In-memory scene graph implementing the document seams.
///
/// Thread-safe via an internal RwLock, like the host API it stands in for:
/// one logical document, many readers.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    inner: RwLock<Inner>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from its serde snapshot form.
    pub fn from_snapshot(snapshot: &DocumentSnapshot) -> Result<Self> {
        let document = Self::new();
        for page in &snapshot.pages {
            if page.kind != NodeKind::Page {
                return Err(anyhow!(
                    "Top-level snapshot node {} is a {}, expected a page",
                    page.id,
                    page.kind
                ));
            }
            document.add_page(page.id.clone(), &page.name);
            for child in &page.children {
                document.insert_snapshot(&page.id, child)?;
            }
        }
        Ok(document)
    }

    fn insert_snapshot(&self, parent: &NodeId, snapshot: &NodeSnapshot) -> Result<()> {
        let record = NodeRecord {
            id: snapshot.id.clone(),
            name: snapshot.name.clone(),
            kind: snapshot.kind,
            description: snapshot.description.clone(),
            main_component: snapshot.main_component.clone(),
        };
        self.insert(parent, record)?;
        for (key, value) in &snapshot.plugin_data {
            self.set_plugin_data(&snapshot.id, key, value)?;
        }
        for child in &snapshot.children {
            self.insert_snapshot(&snapshot.id, child)?;
        }
        Ok(())
    }

    /// Add a page and make it current if it is the first one.
    pub fn add_page(&self, id: NodeId, name: &str) -> NodeId {
        let mut inner = self.inner.write();
        inner.nodes.insert(
            id.clone(),
            StoredNode {
                record: NodeRecord {
                    id: id.clone(),
                    name: name.to_string(),
                    kind: NodeKind::Page,
                    description: None,
                    main_component: None,
                },
                children: Vec::new(),
                plugin_data: HashMap::new(),
                relaunch_description: None,
            },
        );
        inner.pages.push(id.clone());
        if inner.current_page.is_none() {
            inner.current_page = Some(id.clone());
        }
        id
    }

    /// Switch the current page.
    pub fn set_current_page(&self, id: &NodeId) -> Result<()> {
        let mut inner = self.inner.write();
        if !inner.pages.contains(id) {
            return Err(anyhow!("No such page: {}", id));
        }
        inner.current_page = Some(id.clone());
        Ok(())
    }

    /// Insert a node under `parent`.
    pub fn insert(&self, parent: &NodeId, record: NodeRecord) -> Result<NodeId> {
        let mut inner = self.inner.write();
        let id = record.id.clone();
        let parent_node = inner
            .nodes
            .get_mut(parent)
            .ok_or_else(|| anyhow!("Parent node not found: {}", parent))?;
        parent_node.children.push(id.clone());
        inner.nodes.insert(
            id.clone(),
            StoredNode {
                record,
                children: Vec::new(),
                plugin_data: HashMap::new(),
                relaunch_description: None,
            },
        );
        Ok(id)
    }

    /// Add an existing node as a child of `parent`.
    ///
    /// Normal documents are acyclic; this exists so tests can build the
    /// cyclic container shapes the index builder must survive.
    pub fn link_child(&self, parent: &NodeId, child: &NodeId) -> Result<()> {
        let mut inner = self.inner.write();
        if !inner.nodes.contains_key(child) {
            return Err(anyhow!("Child node not found: {}", child));
        }
        let parent_node = inner
            .nodes
            .get_mut(parent)
            .ok_or_else(|| anyhow!("Parent node not found: {}", parent))?;
        parent_node.children.push(child.clone());
        Ok(())
    }

    /// Remove a node, as if the user deleted it from the document.
    ///
    /// Stale references from parents or old indexes simply stop resolving.
    pub fn remove_node(&self, id: &NodeId) {
        self.inner.write().nodes.remove(id);
    }

    /// Relaunch metadata last written for a node, if any.
    pub fn relaunch_description(&self, id: &NodeId) -> Option<String> {
        self.inner
            .read()
            .nodes
            .get(id)
            .and_then(|n| n.relaunch_description.clone())
    }
}

impl DocumentTree for MemoryDocument {
    fn current_page(&self) -> Result<NodeId> {
        self.inner
            .read()
            .current_page
            .clone()
            .ok_or_else(|| anyhow!("Document has no pages"))
    }

    fn children_of(&self, id: &NodeId) -> Result<Vec<NodeRecord>> {
        let inner = self.inner.read();
        let node = inner
            .nodes
            .get(id)
            .ok_or_else(|| anyhow!("Node not found: {}", id))?;
        Ok(node
            .children
            .iter()
            .filter_map(|child| inner.nodes.get(child).map(|n| n.record.clone()))
            .collect())
    }

    fn find_node(&self, id: &NodeId) -> Option<NodeRecord> {
        self.inner.read().nodes.get(id).map(|n| n.record.clone())
    }

    fn plugin_data(&self, id: &NodeId, key: &str) -> Option<String> {
        self.inner
            .read()
            .nodes
            .get(id)
            .and_then(|n| n.plugin_data.get(key).cloned())
    }
}

impl NodeMutator for MemoryDocument {
    fn set_description(&self, id: &NodeId, text: &str) -> Result<()> {
        let mut inner = self.inner.write();
        let node = inner
            .nodes
            .get_mut(id)
            .ok_or_else(|| anyhow!("Node not found: {}", id))?;
        node.record.description = Some(text.to_string());
        Ok(())
    }

    fn set_plugin_data(&self, id: &NodeId, key: &str, value: &str) -> Result<()> {
        let mut inner = self.inner.write();
        let node = inner
            .nodes
            .get_mut(id)
            .ok_or_else(|| anyhow!("Node not found: {}", id))?;
        node.plugin_data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn set_relaunch_description(&self, id: &NodeId, text: &str) -> Result<()> {
        let mut inner = self.inner.write();
        let node = inner
            .nodes
            .get_mut(id)
            .ok_or_else(|| anyhow!("Node not found: {}", id))?;
        node.relaunch_description = Some(text.to_string());
        Ok(())
    }
}

/// In-memory key-value store for tests.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
