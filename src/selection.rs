//! Selection inspection for the surrounding UI.

use icon_document::{NodeId, NodeKind};
use serde::Serialize;

/// What the current selection means for the labeling surface.
#[derive(Debug, Clone, Serialize)]
pub enum SelectionInfo {
    /// Nothing selected.
    Empty,
    /// More than one node selected; labeling works on a single node.
    Multiple,
    /// A single node of a kind this tool cannot label.
    Unsupported { name: String, kind: NodeKind },
    /// A labelable component, component set, or instance.
    Component(ComponentInfo),
}

/// Description summary of one related size variant.
#[derive(Debug, Clone, Serialize)]
pub struct VariantDescription {
    pub name: String,
    pub description: String,
    pub has_description: bool,
}

/// Everything the UI shows for a selected component.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentInfo {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// Effective (override-aware) description. Instances report their main
    /// component's description.
    pub description: String,
    pub has_description: bool,
    /// Resolved size variants, smallest first, including the node itself.
    pub related_variants: Vec<VariantDescription>,
}

impl ComponentInfo {
    /// Number of resolved variants.
    pub fn variant_count(&self) -> usize {
        self.related_variants.len()
    }
}
