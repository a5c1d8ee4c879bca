//! Icon description labeling toolkit.
//!
//! Helps a designer keep icon components searchable: it indexes the current
//! page's components, resolves which nodes are the same icon at another
//! size, suggests description terms through a vision-capable model, and
//! writes accepted descriptions back across every size variant.
//!
//! - **Indexing & propagation**: the [`icon_index`] crate (re-exported
//!   through [`service::IconAtlas`])
//! - **Document seams**: the [`icon_document`] crate
//! - **Model seam**: the [`icon_ai`] crate
//!
//! See [`service::IconAtlas`] for the operations the surrounding host
//! integration calls.

pub mod args;
pub mod compose;
pub mod config;
pub mod selection;
pub mod service;

pub use compose::compose_description;
pub use config::PluginSettings;
pub use selection::{ComponentInfo, SelectionInfo, VariantDescription};
pub use service::IconAtlas;
