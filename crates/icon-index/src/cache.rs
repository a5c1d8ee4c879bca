//! Lifecycle of the persisted icon index.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};
use icon_document::{KeyValueStore, NodeId};
use tracing::{debug, warn};

use crate::builder::IconIndexBuilder;
use crate::entry::IconIndex;

/// Storage key for the persisted index.
pub const ICON_INDEX_KEY: &str = "icon-index";

/// Minutes a cached index stays fresh before the next `get` rebuilds it.
pub const DEFAULT_FRESHNESS_MINUTES: i64 = 5;

/// Owns the lifecycle of the current [`IconIndex`] snapshot.
///
/// At most one index is retained, persisted in session storage so it
/// survives process restarts within the same document session. The persisted
/// value is the only shared state and is replaced wholesale on every
/// rebuild, so readers always observe a complete snapshot. Concurrent
/// rebuilds for the same scope are not deduplicated; the later persist wins.
pub struct IconIndexCache {
    store: Arc<dyn KeyValueStore>,
    builder: IconIndexBuilder,
    freshness: Duration,
}

impl IconIndexCache {
    pub fn new(store: Arc<dyn KeyValueStore>, builder: IconIndexBuilder) -> Self {
        Self {
            store,
            builder,
            freshness: Duration::minutes(DEFAULT_FRESHNESS_MINUTES),
        }
    }

    /// Override the freshness window.
    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    /// Current index for `scope`.
    ///
    /// Returns the persisted index unchanged when it was built from the same
    /// scope inside the freshness window; otherwise rebuilds, persists, and
    /// returns the new snapshot. Storage read failures degrade to a rebuild;
    /// rebuild (traversal) failures propagate, and the caller must treat
    /// that as "no index available".
    pub fn get(&self, scope: &NodeId) -> Result<IconIndex> {
        if let Some(index) = self.load_persisted() {
            let age = Utc::now() - index.built_at;
            if index.scope_id == *scope && age < self.freshness {
                debug!(
                    scope = %scope,
                    entries = index.entries.len(),
                    age_secs = age.num_seconds(),
                    "icon index cache hit"
                );
                return Ok(index);
            }
            debug!(
                scope = %scope,
                cached_scope = %index.scope_id,
                age_secs = age.num_seconds(),
                "icon index stale or out of scope, rebuilding"
            );
        }
        self.rebuild(scope)
    }

    /// Force an immediate rebuild, regardless of freshness.
    ///
    /// Invalidation is eager: the rebuilt index is persisted before this
    /// returns, so the very next `get` from any caller already observes
    /// fresh data. There is no externally visible "invalid" state.
    pub fn invalidate(&self, scope: &NodeId) -> Result<IconIndex> {
        self.rebuild(scope)
    }

    fn load_persisted(&self) -> Option<IconIndex> {
        let raw = match self.store.get(ICON_INDEX_KEY) {
            Ok(value) => value?,
            Err(err) => {
                warn!(error = %err, "failed to read persisted icon index, treating as miss");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(index) => Some(index),
            Err(err) => {
                warn!(error = %err, "failed to decode persisted icon index, treating as miss");
                None
            }
        }
    }

    fn rebuild(&self, scope: &NodeId) -> Result<IconIndex> {
        let index = self.builder.build(scope)?;
        match serde_json::to_string(&index) {
            Ok(json) => {
                if let Err(err) = self.store.set(ICON_INDEX_KEY, &json) {
                    warn!(
                        error = %err,
                        "failed to persist rebuilt icon index, returning in-memory copy"
                    );
                }
            }
            Err(err) => warn!(error = %err, "failed to encode icon index for persistence"),
        }
        Ok(index)
    }
}
