//! Effective-description resolution.

use std::sync::Arc;

use icon_document::{DocumentTree, NodeRecord};

/// Plugin-data key holding the authoritative description override.
pub const CUSTOM_DESCRIPTION_KEY: &str = "custom-description";

/// Resolves a node's effective description.
///
/// The native description field cannot always be written back reliably
/// through the host API, so every description write also lands in a
/// node-scoped override channel, and reads prefer that channel when it holds
/// a non-empty value. This resolver is the single source of truth wherever a
/// "current description" is needed: index building, UI display, and
/// propagation diffing all go through it.
#[derive(Clone)]
pub struct DescriptionResolver {
    tree: Arc<dyn DocumentTree>,
}

impl DescriptionResolver {
    pub fn new(tree: Arc<dyn DocumentTree>) -> Self {
        Self { tree }
    }

    /// Effective description for `record`.
    ///
    /// A non-empty override wins unconditionally; otherwise the native
    /// field (empty for kinds without one).
    pub fn resolve(&self, record: &NodeRecord) -> String {
        match self.tree.plugin_data(&record.id, CUSTOM_DESCRIPTION_KEY) {
            Some(custom) if !custom.is_empty() => custom,
            _ => record.native_description().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icon_document::{MemoryDocument, NodeId, NodeKind, NodeMutator};

    fn doc_with_component(description: Option<&str>) -> (Arc<MemoryDocument>, NodeRecord) {
        let doc = Arc::new(MemoryDocument::new());
        let page = doc.add_page(NodeId::new("0:1"), "Icons");
        let record = NodeRecord {
            id: NodeId::new("1:1"),
            name: "home@16x16".to_string(),
            kind: NodeKind::Component,
            description: description.map(str::to_string),
            main_component: None,
        };
        doc.insert(&page, record.clone()).unwrap();
        (doc, record)
    }

    #[test]
    fn test_native_description_when_no_override() {
        let (doc, record) = doc_with_component(Some("a"));
        let resolver = DescriptionResolver::new(doc);
        assert_eq!(resolver.resolve(&record), "a");
    }

    #[test]
    fn test_override_beats_native() {
        let (doc, record) = doc_with_component(Some("a"));
        doc.set_plugin_data(&record.id, CUSTOM_DESCRIPTION_KEY, "b")
            .unwrap();
        let resolver = DescriptionResolver::new(doc);
        assert_eq!(resolver.resolve(&record), "b");
    }

    #[test]
    fn test_empty_override_falls_back_to_native() {
        let (doc, record) = doc_with_component(Some("a"));
        doc.set_plugin_data(&record.id, CUSTOM_DESCRIPTION_KEY, "")
            .unwrap();
        let resolver = DescriptionResolver::new(doc);
        assert_eq!(resolver.resolve(&record), "a");
    }

    #[test]
    fn test_non_component_kind_has_empty_native() {
        let (doc, _) = doc_with_component(None);
        let frame = NodeRecord {
            id: NodeId::new("9:9"),
            name: "frame".to_string(),
            kind: NodeKind::Frame,
            description: Some("ignored".to_string()),
            main_component: None,
        };
        let resolver = DescriptionResolver::new(doc);
        assert_eq!(resolver.resolve(&frame), "");
    }
}
