//! Vision-model boundary for icon synonym generation.
//!
//! The surrounding application exports an icon as a bitmap, asks a
//! vision-capable completion endpoint for searchable terms, and writes the
//! accepted terms back into component descriptions. This crate owns the seam
//! and the pure logic around it:
//!
//! - [`client::SynonymGenerator`]: the endpoint trait (transport lives with
//!   the host integration, not here)
//! - [`prompt`]: default prompt templates and assembly
//! - [`parse`]: turning raw model text into grouped, cleaned terms

pub mod client;
pub mod parse;
pub mod prompt;

pub use client::{SynonymGenerator, SynonymRequest, SynonymResponse};
pub use parse::{group_terms, parse_terms, SynonymGroup};
pub use prompt::{icon_synonyms_prompt, PromptPair};
