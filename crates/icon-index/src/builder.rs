//! Index construction by document traversal.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use icon_document::{DocumentTree, NodeId};
use tracing::debug;

use crate::describe::DescriptionResolver;
use crate::entry::{IconEntry, IconIndex};

/// Builds [`IconIndex`] snapshots by walking a document scope.
#[derive(Clone)]
pub struct IconIndexBuilder {
    tree: Arc<dyn DocumentTree>,
    resolver: DescriptionResolver,
}

impl IconIndexBuilder {
    pub fn new(tree: Arc<dyn DocumentTree>, resolver: DescriptionResolver) -> Self {
        Self { tree, resolver }
    }

    /// Walk every node under `scope` and assemble a fresh index.
    ///
    /// Containers are recursed; Component and ComponentSet nodes become
    /// entries and are not descended into, so a component set's variant
    /// children are never indexed as unrelated icons. A visited set guards
    /// against cyclic container references. A scope with no indexable nodes
    /// yields an empty index. Traversal errors propagate to the caller.
    pub fn build(&self, scope: &NodeId) -> Result<IconIndex> {
        let mut entries = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(scope.clone());
        self.walk(scope, &mut visited, &mut entries)?;

        let index = IconIndex::new(scope.clone(), entries);
        debug!(
            scope = %index.scope_id,
            entries = index.entries.len(),
            "built icon index"
        );
        Ok(index)
    }

    fn walk(
        &self,
        id: &NodeId,
        visited: &mut HashSet<NodeId>,
        entries: &mut Vec<IconEntry>,
    ) -> Result<()> {
        for child in self.tree.children_of(id)? {
            if !visited.insert(child.id.clone()) {
                continue;
            }
            if child.kind.is_indexable() {
                let description = self.resolver.resolve(&child);
                entries.push(IconEntry::from_resolved(&child, description));
            } else if child.kind.is_container() {
                self.walk(&child.id, visited, entries)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icon_document::{MemoryDocument, NodeKind, NodeMutator, NodeRecord};

    fn node(id: &str, name: &str, kind: NodeKind) -> NodeRecord {
        NodeRecord {
            id: NodeId::new(id),
            name: name.to_string(),
            kind,
            description: None,
            main_component: None,
        }
    }

    fn builder_for(doc: Arc<MemoryDocument>) -> IconIndexBuilder {
        let resolver = DescriptionResolver::new(doc.clone());
        IconIndexBuilder::new(doc, resolver)
    }

    #[test]
    fn test_collects_components_from_nested_containers() {
        let doc = Arc::new(MemoryDocument::new());
        let page = doc.add_page(NodeId::new("0:1"), "Icons");
        let frame = doc
            .insert(&page, node("1:1", "nav", NodeKind::Frame))
            .unwrap();
        let group = doc
            .insert(&frame, node("1:2", "arrows", NodeKind::Group))
            .unwrap();
        doc.insert(&group, node("2:1", "up@16x16", NodeKind::Component))
            .unwrap();
        doc.insert(&page, node("2:2", "down@16x16", NodeKind::Component))
            .unwrap();
        doc.insert(&page, node("3:1", "label", NodeKind::Text)).unwrap();

        let index = builder_for(doc).build(&page).unwrap();
        let names: Vec<&str> = index.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["down@16x16", "up@16x16"]);
    }

    #[test]
    fn test_component_set_children_are_not_indexed() {
        let doc = Arc::new(MemoryDocument::new());
        let page = doc.add_page(NodeId::new("0:1"), "Icons");
        let set = doc
            .insert(&page, node("1:1", "status", NodeKind::ComponentSet))
            .unwrap();
        doc.insert(&set, node("1:2", "state=on", NodeKind::Component))
            .unwrap();
        doc.insert(&set, node("1:3", "state=off", NodeKind::Component))
            .unwrap();

        let index = builder_for(doc).build(&page).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.entries[0].name, "status");
        assert_eq!(index.entries[0].kind, NodeKind::ComponentSet);
    }

    #[test]
    fn test_empty_scope_yields_empty_index() {
        let doc = Arc::new(MemoryDocument::new());
        let page = doc.add_page(NodeId::new("0:1"), "Blank");
        let index = builder_for(doc).build(&page).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.scope_id, page);
    }

    #[test]
    fn test_terminates_on_cyclic_containers() {
        let doc = Arc::new(MemoryDocument::new());
        let page = doc.add_page(NodeId::new("0:1"), "Icons");
        let a = doc
            .insert(&page, node("1:1", "a", NodeKind::Frame))
            .unwrap();
        let b = doc.insert(&a, node("1:2", "b", NodeKind::Frame)).unwrap();
        doc.link_child(&b, &a).unwrap();
        doc.insert(&b, node("2:1", "deep@16x16", NodeKind::Component))
            .unwrap();

        let index = builder_for(doc).build(&page).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.entries[0].name, "deep@16x16");
    }

    #[test]
    fn test_entries_use_resolved_descriptions() {
        let doc = Arc::new(MemoryDocument::new());
        let page = doc.add_page(NodeId::new("0:1"), "Icons");
        let mut with_native = node("1:1", "home@16x16", NodeKind::Component);
        with_native.description = Some("native".to_string());
        doc.insert(&page, with_native).unwrap();
        doc.set_plugin_data(
            &NodeId::new("1:1"),
            crate::describe::CUSTOM_DESCRIPTION_KEY,
            "override",
        )
        .unwrap();

        let index = builder_for(doc).build(&page).unwrap();
        assert_eq!(index.entries[0].description, "override");
        assert!(index.entries[0].has_description);
    }

    #[test]
    fn test_has_description_never_diverges_from_description() {
        let doc = Arc::new(MemoryDocument::new());
        let page = doc.add_page(NodeId::new("0:1"), "Icons");
        let mut described = node("1:1", "a@16x16", NodeKind::Component);
        described.description = Some("something".to_string());
        doc.insert(&page, described).unwrap();
        let mut blank = node("1:2", "b@16x16", NodeKind::Component);
        blank.description = Some("   ".to_string());
        doc.insert(&page, blank).unwrap();
        doc.insert(&page, node("1:3", "c@16x16", NodeKind::Component))
            .unwrap();

        let index = builder_for(doc).build(&page).unwrap();
        for entry in &index.entries {
            assert_eq!(
                entry.has_description,
                !entry.description.trim().is_empty(),
                "divergence on {}",
                entry.name
            );
        }
    }
}
