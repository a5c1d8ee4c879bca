//! Best-effort description propagation across size variants.

use std::sync::Arc;

use icon_document::{DocumentTree, NodeId, NodeMutator, NodeRecord};
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::IconIndexCache;
use crate::describe::CUSTOM_DESCRIPTION_KEY;
use crate::variants::VariantResolver;

/// Outcome of one variant's write attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum WriteOutcome {
    /// At least one durable channel accepted the write.
    Updated,
    /// The backing node no longer exists; expected after deletions.
    NotFound,
    /// Every durable channel failed for this variant.
    Failed { message: String },
}

/// Per-variant record of a propagation attempt.
#[derive(Debug, Clone, Serialize)]
pub struct VariantWrite {
    pub id: NodeId,
    pub name: String,
    pub outcome: WriteOutcome,
}

/// Summary of a propagation fan-out.
///
/// Propagation is deliberately best-effort: the host store has no multi-node
/// transaction, so the contract is "attempt all, report what happened". A
/// single variant's failure never stops the remaining variants.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PropagationResult {
    /// Variants the resolver produced.
    pub attempted: usize,

    /// Variants that accepted the new description.
    pub updated: usize,

    /// Variants whose backing node could not be located.
    pub not_found: usize,

    /// First write error encountered, for caller diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_error: Option<String>,

    /// Per-variant outcomes, in fan-out order.
    pub writes: Vec<VariantWrite>,
}

impl PropagationResult {
    /// True when no write error was recorded (missing nodes are fine).
    pub fn is_clean(&self) -> bool {
        self.first_error.is_none()
    }

    fn note_error(&mut self, id: &NodeId, channel: &str, err: &anyhow::Error) {
        warn!(node = %id, channel = channel, error = %err, "variant write failed");
        if self.first_error.is_none() {
            self.first_error = Some(format!("{}: {} write failed: {}", id, channel, err));
        }
    }
}

/// Applies a description to every resolved size variant.
pub struct DescriptionPropagator {
    variants: VariantResolver,
    cache: Arc<IconIndexCache>,
    tree: Arc<dyn DocumentTree>,
    mutator: Arc<dyn NodeMutator>,
}

impl DescriptionPropagator {
    pub fn new(
        variants: VariantResolver,
        cache: Arc<IconIndexCache>,
        tree: Arc<dyn DocumentTree>,
        mutator: Arc<dyn NodeMutator>,
    ) -> Self {
        Self {
            variants,
            cache,
            tree,
            mutator,
        }
    }

    /// Write `new_description` to every size variant of `reference`.
    ///
    /// Per variant, three channels are attempted in order: the native
    /// description field, the node-scoped override (authoritative for future
    /// reads, attempted even when the native write fails), and relaunch
    /// metadata when the host supports it. Writes are issued sequentially so
    /// error attribution stays per-variant. The index is invalidated
    /// unconditionally afterwards, so subsequent reads reflect whatever
    /// succeeded.
    pub fn apply(
        &self,
        reference: &NodeRecord,
        scope: &NodeId,
        new_description: &str,
    ) -> PropagationResult {
        let set = self.variants.resolve_or_self(reference, scope);

        let mut result = PropagationResult {
            attempted: set.entries.len(),
            ..PropagationResult::default()
        };
        for entry in &set.entries {
            let outcome = self.write_variant(&entry.id, new_description, &mut result);
            match &outcome {
                WriteOutcome::Updated => result.updated += 1,
                WriteOutcome::NotFound => result.not_found += 1,
                WriteOutcome::Failed { .. } => {}
            }
            result.writes.push(VariantWrite {
                id: entry.id.clone(),
                name: entry.name.clone(),
                outcome,
            });
        }

        if let Err(err) = self.cache.invalidate(scope) {
            warn!(error = %err, "index invalidation after propagation failed");
        }
        debug!(
            attempted = result.attempted,
            updated = result.updated,
            not_found = result.not_found,
            "propagated description"
        );
        result
    }

    fn write_variant(
        &self,
        id: &NodeId,
        text: &str,
        result: &mut PropagationResult,
    ) -> WriteOutcome {
        if self.tree.find_node(id).is_none() {
            return WriteOutcome::NotFound;
        }

        let mut local_error: Option<String> = None;
        let native_ok = match self.mutator.set_description(id, text) {
            Ok(()) => true,
            Err(err) => {
                local_error.get_or_insert_with(|| err.to_string());
                result.note_error(id, "native description", &err);
                false
            }
        };
        let override_ok = match self.mutator.set_plugin_data(id, CUSTOM_DESCRIPTION_KEY, text) {
            Ok(()) => true,
            Err(err) => {
                local_error.get_or_insert_with(|| err.to_string());
                result.note_error(id, "description override", &err);
                false
            }
        };
        // Third redundancy layer; its failure never discolors the result.
        if self.mutator.supports_relaunch_data() {
            if let Err(err) = self.mutator.set_relaunch_description(id, text) {
                warn!(node = %id, error = %err, "relaunch metadata write failed");
            }
        }

        if native_ok || override_ok {
            WriteOutcome::Updated
        } else {
            WriteOutcome::Failed {
                message: local_error
                    .unwrap_or_else(|| "all write channels failed".to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::IconIndexBuilder;
    use crate::describe::DescriptionResolver;
    use anyhow::{anyhow, Result};
    use icon_document::{MemoryDocument, MemoryKeyValueStore, NodeKind, NodeRecord};
    use parking_lot::RwLock;
    use std::collections::HashSet;

    fn node(id: &str, name: &str) -> NodeRecord {
        NodeRecord {
            id: NodeId::new(id),
            name: name.to_string(),
            kind: NodeKind::Component,
            description: None,
            main_component: None,
        }
    }

    struct Fixture {
        doc: Arc<MemoryDocument>,
        variants: VariantResolver,
        cache: Arc<IconIndexCache>,
        page: NodeId,
    }

    fn setup() -> Fixture {
        let doc = Arc::new(MemoryDocument::new());
        let page = doc.add_page(NodeId::new("0:1"), "Icons");
        for (id, name) in [
            ("1:1", "icon@16x16"),
            ("1:2", "icon@24x24"),
            ("1:3", "icon@32x32"),
        ] {
            doc.insert(&page, node(id, name)).unwrap();
        }
        let resolver = DescriptionResolver::new(doc.clone());
        let builder = IconIndexBuilder::new(doc.clone(), resolver.clone());
        let cache = Arc::new(IconIndexCache::new(
            Arc::new(MemoryKeyValueStore::new()),
            builder,
        ));
        let variants = VariantResolver::new(cache.clone(), doc.clone(), resolver);
        Fixture {
            doc,
            variants,
            cache,
            page,
        }
    }

    fn propagator(fixture: &Fixture, mutator: Arc<dyn NodeMutator>) -> DescriptionPropagator {
        DescriptionPropagator::new(
            fixture.variants.clone(),
            fixture.cache.clone(),
            fixture.doc.clone(),
            mutator,
        )
    }

    /// Delegates to the inner document, failing selected channels per node.
    struct FlakyMutator {
        inner: Arc<MemoryDocument>,
        fail_native: RwLock<HashSet<NodeId>>,
        fail_override: RwLock<HashSet<NodeId>>,
    }

    impl FlakyMutator {
        fn new(inner: Arc<MemoryDocument>) -> Self {
            Self {
                inner,
                fail_native: RwLock::new(HashSet::new()),
                fail_override: RwLock::new(HashSet::new()),
            }
        }
    }

    impl NodeMutator for FlakyMutator {
        fn set_description(&self, id: &NodeId, text: &str) -> Result<()> {
            if self.fail_native.read().contains(id) {
                return Err(anyhow!("native channel rejected"));
            }
            self.inner.set_description(id, text)
        }

        fn set_plugin_data(&self, id: &NodeId, key: &str, value: &str) -> Result<()> {
            if self.fail_override.read().contains(id) {
                return Err(anyhow!("override channel rejected"));
            }
            self.inner.set_plugin_data(id, key, value)
        }

        fn set_relaunch_description(&self, id: &NodeId, text: &str) -> Result<()> {
            self.inner.set_relaunch_description(id, text)
        }
    }

    #[test]
    fn test_apply_updates_all_variants_and_invalidates() {
        let fixture = setup();
        let propagator = propagator(&fixture, fixture.doc.clone());
        let reference = fixture.doc.find_node(&NodeId::new("1:2")).unwrap();

        let before = fixture.cache.get(&fixture.page).unwrap();
        let result = propagator.apply(&reference, &fixture.page, "new text");
        assert_eq!(result.attempted, 3);
        assert_eq!(result.updated, 3);
        assert_eq!(result.not_found, 0);
        assert!(result.is_clean());

        // All three channels were written
        for id in ["1:1", "1:2", "1:3"] {
            let id = NodeId::new(id);
            let record = fixture.doc.find_node(&id).unwrap();
            assert_eq!(record.description.as_deref(), Some("new text"));
            assert_eq!(
                fixture.doc.plugin_data(&id, CUSTOM_DESCRIPTION_KEY).as_deref(),
                Some("new text")
            );
            assert_eq!(
                fixture.doc.relaunch_description(&id).as_deref(),
                Some("new text")
            );
        }

        // Invalidation already rebuilt the index with the new descriptions
        let after = fixture.cache.get(&fixture.page).unwrap();
        assert!(after.built_at > before.built_at);
        assert!(after.entries.iter().all(|e| e.description == "new text"));
    }

    #[test]
    fn test_missing_variant_is_counted_not_fatal() {
        let fixture = setup();
        let propagator = propagator(&fixture, fixture.doc.clone());
        let reference = fixture.doc.find_node(&NodeId::new("1:1")).unwrap();

        // Warm the index, then delete one variant behind its back
        fixture.cache.get(&fixture.page).unwrap();
        fixture.doc.remove_node(&NodeId::new("1:3"));

        let result = propagator.apply(&reference, &fixture.page, "new text");
        assert_eq!(result.attempted, 3);
        assert_eq!(result.not_found, 1);
        assert_eq!(result.updated, 2);
        assert!(result.is_clean());

        // Post-invalidation, the surviving variants carry the new text
        let set = fixture
            .variants
            .resolve(&reference, &fixture.page)
            .unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.entries.iter().all(|e| e.description == "new text"));
    }

    #[test]
    fn test_native_failure_still_updates_via_override() {
        let fixture = setup();
        let flaky = Arc::new(FlakyMutator::new(fixture.doc.clone()));
        flaky.fail_native.write().insert(NodeId::new("1:2"));
        let propagator = propagator(&fixture, flaky);
        let reference = fixture.doc.find_node(&NodeId::new("1:1")).unwrap();

        let result = propagator.apply(&reference, &fixture.page, "fresh");
        assert_eq!(result.attempted, 3);
        assert_eq!(result.updated, 3);
        assert!(result.first_error.is_some());

        // The override channel carried the write, so reads see the new value
        let set = fixture
            .variants
            .resolve(&reference, &fixture.page)
            .unwrap();
        assert!(set.entries.iter().all(|e| e.description == "fresh"));
    }

    #[test]
    fn test_both_channels_failing_marks_variant_failed() {
        let fixture = setup();
        let flaky = Arc::new(FlakyMutator::new(fixture.doc.clone()));
        flaky.fail_native.write().insert(NodeId::new("1:2"));
        flaky.fail_override.write().insert(NodeId::new("1:2"));
        let propagator = propagator(&fixture, flaky);
        let reference = fixture.doc.find_node(&NodeId::new("1:1")).unwrap();

        let result = propagator.apply(&reference, &fixture.page, "fresh");
        assert_eq!(result.attempted, 3);
        assert_eq!(result.updated, 2);
        let failed: Vec<_> = result
            .writes
            .iter()
            .filter(|w| matches!(w.outcome, WriteOutcome::Failed { .. }))
            .collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].id, NodeId::new("1:2"));

        // The remaining variants were still attempted and updated
        assert_eq!(
            fixture
                .doc
                .plugin_data(&NodeId::new("1:3"), CUSTOM_DESCRIPTION_KEY)
                .as_deref(),
            Some("fresh")
        );
    }

    #[test]
    fn test_broken_resolution_degrades_to_reference_only() {
        let fixture = setup();
        let propagator = propagator(&fixture, fixture.doc.clone());
        let reference = fixture.doc.find_node(&NodeId::new("1:1")).unwrap();

        let missing_scope = NodeId::new("9:9");
        let result = propagator.apply(&reference, &missing_scope, "solo");
        assert_eq!(result.attempted, 1);
        assert_eq!(result.updated, 1);
        assert_eq!(
            fixture
                .doc
                .plugin_data(&NodeId::new("1:1"), CUSTOM_DESCRIPTION_KEY)
                .as_deref(),
            Some("solo")
        );
    }
}
