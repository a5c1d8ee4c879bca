//! Application service wiring the document, index, and model seams.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use base64::Engine;
use icon_ai::{group_terms, parse_terms, SynonymGenerator, SynonymGroup, SynonymRequest};
use icon_document::{
    DocumentTree, IconExporter, KeyValueStore, NodeId, NodeKind, NodeMutator, NodeRecord,
};
use icon_index::{
    DescriptionPropagator, DescriptionResolver, IconIndex, IconIndexBuilder, IconIndexCache,
    PropagationResult, VariantResolver, VariantSet,
};
use tracing::debug;

use crate::compose::compose_description;
use crate::config::PluginSettings;
use crate::selection::{ComponentInfo, SelectionInfo, VariantDescription};

/// Export scale used when rendering icons for the model.
const EXPORT_SCALE: f32 = 2.0;

/// One handle over everything the labeling surface can do.
///
/// Owns the collaborator seams and the derived-index machinery; constructed
/// once per document session and shared by reference.
pub struct IconAtlas {
    tree: Arc<dyn DocumentTree>,
    store: Arc<dyn KeyValueStore>,
    cache: Arc<IconIndexCache>,
    resolver: DescriptionResolver,
    variants: VariantResolver,
    propagator: DescriptionPropagator,
    exporter: Option<Arc<dyn IconExporter>>,
    generator: Option<Arc<dyn SynonymGenerator>>,
}

impl IconAtlas {
    /// Wire up the core against the given document seams.
    pub fn new(
        tree: Arc<dyn DocumentTree>,
        mutator: Arc<dyn NodeMutator>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let resolver = DescriptionResolver::new(tree.clone());
        let builder = IconIndexBuilder::new(tree.clone(), resolver.clone());
        let cache = Arc::new(IconIndexCache::new(store.clone(), builder));
        let variants = VariantResolver::new(cache.clone(), tree.clone(), resolver.clone());
        let propagator = DescriptionPropagator::new(
            variants.clone(),
            cache.clone(),
            tree.clone(),
            mutator,
        );
        Self {
            tree,
            store,
            cache,
            resolver,
            variants,
            propagator,
            exporter: None,
            generator: None,
        }
    }

    /// Attach a node exporter, enabling the synonym-generation flow.
    pub fn with_exporter(mut self, exporter: Arc<dyn IconExporter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    /// Attach a synonym generator, enabling the synonym-generation flow.
    pub fn with_generator(mut self, generator: Arc<dyn SynonymGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Session storage handle (settings live here too).
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Current settings.
    pub fn settings(&self) -> PluginSettings {
        PluginSettings::load(self.store.as_ref())
    }

    /// Persist new settings.
    pub fn save_settings(&self, settings: &PluginSettings) -> Result<()> {
        settings.save(self.store.as_ref())
    }

    fn current_scope(&self) -> Result<NodeId> {
        self.tree.current_page()
    }

    fn require_node(&self, id: &NodeId) -> Result<NodeRecord> {
        self.tree
            .find_node(id)
            .ok_or_else(|| anyhow!("Node not found: {}", id))
    }

    /// The icon index for the current page, rebuilt if missing or stale.
    pub fn index(&self) -> Result<IconIndex> {
        let scope = self.current_scope()?;
        self.cache.get(&scope)
    }

    /// Force an index rebuild for the current page.
    pub fn invalidate_index(&self) -> Result<IconIndex> {
        let scope = self.current_scope()?;
        self.cache.invalidate(&scope)
    }

    /// Size variants of a node, degrading to the node alone when the index
    /// is unavailable.
    pub fn resolve_variants(&self, id: &NodeId) -> Result<VariantSet> {
        let record = self.require_node(id)?;
        let scope = self.current_scope()?;
        Ok(self.variants.resolve_or_self(&record, &scope))
    }

    /// Propagate a manually edited description across all size variants.
    pub fn update_description(&self, id: &NodeId, text: &str) -> Result<PropagationResult> {
        let record = self.require_node(id)?;
        let scope = self.current_scope()?;
        Ok(self.propagator.apply(&record, &scope, text))
    }

    /// Compose a description from accepted synonym groups and propagate it.
    ///
    /// The group lines are appended below the node's current effective
    /// description, then written to every size variant.
    pub fn apply_synonyms(
        &self,
        id: &NodeId,
        groups: &[SynonymGroup],
    ) -> Result<PropagationResult> {
        let record = self.require_node(id)?;
        let scope = self.current_scope()?;
        let existing = self.resolver.resolve(&self.describable_record(&record));
        let new_description = compose_description(&existing, groups);
        Ok(self.propagator.apply(&record, &scope, &new_description))
    }

    /// What the given selection means for the labeling surface.
    pub fn selection_info(&self, selection: &[NodeId]) -> SelectionInfo {
        let id = match selection {
            [] => return SelectionInfo::Empty,
            [id] => id,
            _ => return SelectionInfo::Multiple,
        };
        let record = match self.tree.find_node(id) {
            Some(record) => record,
            None => return SelectionInfo::Empty,
        };
        if !record.kind.is_describable() {
            return SelectionInfo::Unsupported {
                name: record.name,
                kind: record.kind,
            };
        }

        let described = self.describable_record(&record);
        let description = self.resolver.resolve(&described);
        let scope = self.current_scope().ok();
        let related_variants = match scope {
            Some(scope) => self
                .variants
                .resolve_or_self(&record, &scope)
                .entries
                .into_iter()
                .map(|entry| VariantDescription {
                    name: entry.name,
                    description: entry.description,
                    has_description: entry.has_description,
                })
                .collect(),
            None => Vec::new(),
        };

        SelectionInfo::Component(ComponentInfo {
            id: record.id,
            name: record.name,
            kind: record.kind,
            has_description: !description.trim().is_empty(),
            description,
            related_variants,
        })
    }

    /// The node whose pixels and description best represent `record`.
    ///
    /// Instances defer to their main component when it can be located.
    fn describable_record(&self, record: &NodeRecord) -> NodeRecord {
        if record.kind == NodeKind::Instance {
            if let Some(main) = record
                .main_component
                .as_ref()
                .and_then(|id| self.tree.find_node(id))
            {
                return main;
            }
        }
        record.clone()
    }

    /// Pick the best node to export from a selection: a component if one is
    /// selected, otherwise an instance's main component, otherwise the first
    /// selected node.
    pub fn best_export_target(&self, selection: &[NodeId]) -> Option<NodeRecord> {
        let records: Vec<NodeRecord> = selection
            .iter()
            .filter_map(|id| self.tree.find_node(id))
            .collect();
        if records.is_empty() {
            return None;
        }
        if records.len() == 1 {
            return Some(self.describable_record(&records[0]));
        }
        if let Some(component) = records.iter().find(|r| r.kind == NodeKind::Component) {
            return Some(component.clone());
        }
        if let Some(instance) = records.iter().find(|r| r.kind == NodeKind::Instance) {
            return Some(self.describable_record(instance));
        }
        Some(self.describable_record(&records[0]))
    }

    /// Generate grouped synonym suggestions for a node.
    ///
    /// Exports the node as a bitmap, asks the configured model for terms,
    /// and returns them grouped for review. Nothing is written back until
    /// the caller accepts terms via [`Self::apply_synonyms`].
    pub async fn generate_synonyms(&self, id: &NodeId) -> Result<Vec<SynonymGroup>> {
        let exporter = self
            .exporter
            .as_ref()
            .ok_or_else(|| anyhow!("No icon exporter configured"))?;
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| anyhow!("No synonym generator configured"))?;

        let record = self.require_node(id)?;
        let target = self.describable_record(&record);
        let png = exporter.export_png(&target.id, EXPORT_SCALE)?;
        let image_png_base64 = base64::engine::general_purpose::STANDARD.encode(png);

        let description = self.resolver.resolve(&target);
        let settings = self.settings();
        let request = SynonymRequest {
            icon_name: target.name.clone(),
            image_png_base64,
            existing_description: if description.trim().is_empty() {
                None
            } else {
                Some(description)
            },
            system_message: settings.system_message,
            user_prompt: settings.user_prompt,
        };

        let response = generator.generate(&request).await?;
        let terms = parse_terms(&response.raw_text);
        let groups = group_terms(&terms);
        debug!(
            node = %target.id,
            terms = terms.len(),
            groups = groups.len(),
            "generated synonym suggestions"
        );
        Ok(groups)
    }
}
