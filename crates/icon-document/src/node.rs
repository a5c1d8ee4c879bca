//! Node identifiers, kinds, and snapshot records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque stable identifier of a document node (e.g. `"12:345"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Closed set of node kinds the host document can expose.
///
/// Keeping this a closed union means every call site that cares about kinds
/// matches exhaustively, so adding an indexable kind is a compile-checked
/// decision rather than a string comparison scattered across the codebase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Page,
    Frame,
    Group,
    Section,
    BooleanOperation,
    Component,
    ComponentSet,
    Instance,
    Vector,
    Text,
    Other,
}

impl NodeKind {
    /// Container kinds whose children are traversed during index building.
    ///
    /// `ComponentSet` is deliberately excluded: its children are the set's
    /// own variant components, already covered by indexing the set itself.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            NodeKind::Page
                | NodeKind::Frame
                | NodeKind::Group
                | NodeKind::Section
                | NodeKind::BooleanOperation
        )
    }

    /// Kinds that produce an index entry.
    pub fn is_indexable(self) -> bool {
        matches!(self, NodeKind::Component | NodeKind::ComponentSet)
    }

    /// Kinds the labeling surface can describe (instances proxy to their
    /// main component).
    pub fn is_describable(self) -> bool {
        matches!(
            self,
            NodeKind::Component | NodeKind::ComponentSet | NodeKind::Instance
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NodeKind::Page => "page",
            NodeKind::Frame => "frame",
            NodeKind::Group => "group",
            NodeKind::Section => "section",
            NodeKind::BooleanOperation => "boolean operation",
            NodeKind::Component => "component",
            NodeKind::ComponentSet => "component set",
            NodeKind::Instance => "instance",
            NodeKind::Vector => "vector",
            NodeKind::Text => "text",
            NodeKind::Other => "other",
        };
        f.write_str(label)
    }
}

/// Snapshot view of a single node as exposed by the host document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Stable node id.
    pub id: NodeId,

    /// Display name as authored.
    pub name: String,

    /// Node kind tag.
    pub kind: NodeKind,

    /// Native description field (components and component sets only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Main component backing an instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_component: Option<NodeId>,
}

impl NodeRecord {
    /// Native description, defaulting to empty for kinds that have none.
    pub fn native_description(&self) -> &str {
        match self.kind {
            NodeKind::Component | NodeKind::ComponentSet => {
                self.description.as_deref().unwrap_or("")
            }
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_and_indexable_are_disjoint() {
        let all = [
            NodeKind::Page,
            NodeKind::Frame,
            NodeKind::Group,
            NodeKind::Section,
            NodeKind::BooleanOperation,
            NodeKind::Component,
            NodeKind::ComponentSet,
            NodeKind::Instance,
            NodeKind::Vector,
            NodeKind::Text,
            NodeKind::Other,
        ];
        for kind in all {
            assert!(
                !(kind.is_container() && kind.is_indexable()),
                "{kind} is both container and indexable"
            );
        }
        assert!(NodeKind::Component.is_indexable());
        assert!(NodeKind::ComponentSet.is_indexable());
        assert!(!NodeKind::ComponentSet.is_container());
        assert!(NodeKind::Frame.is_container());
    }

    #[test]
    fn test_native_description_only_for_components() {
        let component = NodeRecord {
            id: NodeId::new("1:1"),
            name: "icon".to_string(),
            kind: NodeKind::Component,
            description: Some("a description".to_string()),
            main_component: None,
        };
        assert_eq!(component.native_description(), "a description");

        let frame = NodeRecord {
            kind: NodeKind::Frame,
            ..component.clone()
        };
        assert_eq!(frame.native_description(), "");
    }

    #[test]
    fn test_node_id_serde_is_transparent() {
        let id = NodeId::new("12:345");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"12:345\"");
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
