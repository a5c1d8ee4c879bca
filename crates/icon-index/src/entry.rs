//! Index snapshot types.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use icon_document::{NodeId, NodeKind, NodeRecord};
use serde::{Deserialize, Serialize};

use crate::normalize::{self, IconSize};

/// One indexed icon component.
///
/// Immutable snapshot record. `has_description` is derived from
/// `description` at construction; the two never diverge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconEntry {
    /// Backing node id.
    pub id: NodeId,

    /// Raw display name as authored.
    pub name: String,

    /// Name with any trailing size suffix removed.
    pub base_name: String,

    /// Node kind (Component or ComponentSet for indexed entries).
    pub kind: NodeKind,

    /// Effective description (override-aware, see [`crate::describe`]).
    pub description: String,

    /// Whether `description` is non-blank.
    pub has_description: bool,

    /// Size parsed from a trailing `@WxH` suffix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<IconSize>,
}

impl IconEntry {
    /// Build an entry from a node record and its resolved description.
    pub fn from_resolved(record: &NodeRecord, description: String) -> Self {
        let has_description = !description.trim().is_empty();
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            base_name: normalize::base_name(&record.name),
            kind: record.kind,
            description,
            has_description,
            size: normalize::parse_size(&record.name),
        }
    }

    /// Comparison key of this entry's base name.
    pub fn comparison_key(&self) -> String {
        normalize::comparison_key(&self.base_name)
    }
}

/// Derived index over one document scope's icon components.
///
/// Built once, replaced wholesale on every rebuild; no component mutates an
/// index in place, so readers always observe a complete snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconIndex {
    /// Scope (page) the index was built from.
    pub scope_id: NodeId,

    /// Construction timestamp.
    pub built_at: DateTime<Utc>,

    /// Entries sorted by (base name ascending, width ascending, entries
    /// without a size last).
    pub entries: Vec<IconEntry>,
}

impl IconIndex {
    /// Assemble a new index snapshot, sorting and stamping it.
    pub(crate) fn new(scope_id: NodeId, mut entries: Vec<IconEntry>) -> Self {
        sort_entries(&mut entries);
        Self {
            scope_id,
            built_at: Utc::now(),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sort per the index ordering invariant.
///
/// Stable, so entries without a size keep their traversal order relative to
/// each other.
fn sort_entries(entries: &mut [IconEntry]) {
    entries.sort_by(|a, b| {
        a.base_name
            .cmp(&b.base_name)
            .then_with(|| match (&a.size, &b.size) {
                (Some(x), Some(y)) => x.width.cmp(&y.width),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    });
}
