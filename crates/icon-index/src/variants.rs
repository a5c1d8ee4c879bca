//! Size-variant resolution against the cached index.

use std::sync::Arc;

use anyhow::Result;
use icon_document::{DocumentTree, NodeId, NodeKind, NodeRecord};
use tracing::{debug, warn};

use crate::cache::IconIndexCache;
use crate::describe::DescriptionResolver;
use crate::entry::IconEntry;
use crate::normalize;

/// Result of a size-variant resolution query.
///
/// A subsequence of the current index's entries, in index order (smallest
/// width first). Recomputed per call; never persisted.
#[derive(Debug, Clone)]
pub struct VariantSet {
    /// Comparison key the query matched on.
    pub key: String,

    /// Matching entries.
    pub entries: Vec<IconEntry>,
}

impl VariantSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves "the same icon at another size" for a reference node.
#[derive(Clone)]
pub struct VariantResolver {
    cache: Arc<IconIndexCache>,
    tree: Arc<dyn DocumentTree>,
    resolver: DescriptionResolver,
}

impl VariantResolver {
    pub fn new(
        cache: Arc<IconIndexCache>,
        tree: Arc<dyn DocumentTree>,
        resolver: DescriptionResolver,
    ) -> Self {
        Self {
            cache,
            tree,
            resolver,
        }
    }

    /// All index entries sharing `reference`'s normalized base name.
    ///
    /// Instances are keyed by their main component's name when it can still
    /// be located. A node the index has not seen yet (created after the last
    /// build, or hidden by a stale snapshot) resolves to itself alone —
    /// callers never receive an empty set for a node that exists.
    ///
    /// Index rebuild failures propagate; see [`Self::resolve_or_self`] for
    /// the degraded form.
    pub fn resolve(&self, reference: &NodeRecord, scope: &NodeId) -> Result<VariantSet> {
        let key = self.reference_key(reference);
        let index = self.cache.get(scope)?;
        let entries: Vec<IconEntry> = index
            .entries
            .iter()
            .filter(|entry| normalize::comparison_key(&entry.base_name) == key)
            .cloned()
            .collect();
        if entries.is_empty() {
            debug!(
                key = %key,
                node = %reference.id,
                "no indexed variants, falling back to the node itself"
            );
            return Ok(VariantSet {
                key,
                entries: vec![self.self_entry(reference)],
            });
        }
        debug!(key = %key, variants = entries.len(), "resolved size variants");
        Ok(VariantSet { key, entries })
    }

    /// Like [`Self::resolve`], but degrades to the reference node as its own
    /// sole variant when the index cannot be (re)built.
    pub fn resolve_or_self(&self, reference: &NodeRecord, scope: &NodeId) -> VariantSet {
        match self.resolve(reference, scope) {
            Ok(set) => set,
            Err(err) => {
                warn!(
                    node = %reference.id,
                    error = %err,
                    "variant resolution failed, treating the node as its only variant"
                );
                VariantSet {
                    key: self.reference_key(reference),
                    entries: vec![self.self_entry(reference)],
                }
            }
        }
    }

    /// Freshly computed entry for the reference node itself.
    pub fn self_entry(&self, reference: &NodeRecord) -> IconEntry {
        IconEntry::from_resolved(reference, self.resolver.resolve(reference))
    }

    /// Comparison key for `reference`, following instances to their main
    /// component's name when possible.
    fn reference_key(&self, reference: &NodeRecord) -> String {
        let name = if reference.kind == NodeKind::Instance {
            reference
                .main_component
                .as_ref()
                .and_then(|id| self.tree.find_node(id))
                .map(|main| main.name)
                .unwrap_or_else(|| reference.name.clone())
        } else {
            reference.name.clone()
        };
        normalize::comparison_key(&normalize::base_name(&name))
    }
}
