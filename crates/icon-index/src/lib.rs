//! Icon indexing and size-variant resolution over a design document.
//!
//! Icon libraries ship the same glyph at several raster sizes as separate
//! components, conventionally named with a trailing size suffix
//! (`arrow-down@16x16`, `arrow-down@24x24`). This crate maintains a derived
//! index over the current page's components so that "the same icon at
//! another size" can be resolved quickly, and propagates description
//! updates across every resolved variant.
//!
//! The pipeline, leaf first:
//!
//! - [`normalize`]: pure name normalization (size suffix, slash spacing)
//! - [`describe::DescriptionResolver`]: override-aware effective descriptions
//! - [`builder::IconIndexBuilder`]: document traversal into an [`IconIndex`]
//! - [`cache::IconIndexCache`]: persisted snapshot with a freshness window
//! - [`variants::VariantResolver`]: base-name matching over the cached index
//! - [`propagate::DescriptionPropagator`]: best-effort fan-out writes
//!
//! # Example
//!
//! ```ignore
//! use icon_index::{DescriptionResolver, IconIndexBuilder, IconIndexCache, VariantResolver};
//!
//! let resolver = DescriptionResolver::new(tree.clone());
//! let builder = IconIndexBuilder::new(tree.clone(), resolver.clone());
//! let cache = Arc::new(IconIndexCache::new(store, builder));
//! let variants = VariantResolver::new(cache, tree, resolver);
//!
//! let set = variants.resolve(&node, &page_id)?;
//! // set.entries: every size variant of `node`, smallest width first
//! ```

pub mod builder;
pub mod cache;
pub mod describe;
pub mod entry;
pub mod normalize;
pub mod propagate;
pub mod variants;

pub use builder::IconIndexBuilder;
pub use cache::{IconIndexCache, ICON_INDEX_KEY};
pub use describe::{DescriptionResolver, CUSTOM_DESCRIPTION_KEY};
pub use entry::{IconEntry, IconIndex};
pub use normalize::IconSize;
pub use propagate::{DescriptionPropagator, PropagationResult, VariantWrite, WriteOutcome};
pub use variants::{VariantResolver, VariantSet};
