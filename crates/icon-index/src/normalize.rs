//! Name normalization for icon lookup.
//!
//! Icon components encode their raster size as a trailing `@WxH` suffix
//! (`arrow-down@24x24`) and hierarchical names use `/` separators with
//! inconsistent spacing (`Folder / Open` vs `folder/open`). These helpers
//! derive keys that are stable across both conventions.
//!
//! All functions here are pure and total over strings: malformed input is
//! never an error, it simply fails to match.

use serde::{Deserialize, Serialize};

/// Pixel size parsed from a `@WxH` name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSize {
    pub width: u32,
    pub height: u32,
}

/// Split a trimmed name into `(head, size)` when it ends with `@WxH`.
///
/// Shared by [`base_name`] and [`parse_size`] so the two can never disagree
/// about what counts as a size suffix.
fn split_size_suffix(trimmed: &str) -> Option<(&str, IconSize)> {
    let at = trimmed.rfind('@')?;
    let (head, suffix) = (&trimmed[..at], &trimmed[at + 1..]);
    let (w, h) = suffix.split_once('x')?;
    if w.is_empty() || h.is_empty() {
        return None;
    }
    if !w.bytes().all(|b| b.is_ascii_digit()) || !h.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let size = IconSize {
        width: w.parse().ok()?,
        height: h.parse().ok()?,
    };
    Some((head, size))
}

/// Display name with any trailing `@WxH` size suffix removed, trimmed.
///
/// Idempotent: the result never ends with a size suffix, so applying it
/// again returns the same string.
pub fn base_name(name: &str) -> String {
    let mut current = name.trim();
    while let Some((head, _)) = split_size_suffix(current) {
        current = head.trim_end();
    }
    current.trim().to_string()
}

/// Lower-cased name with whitespace around `/` separators collapsed.
///
/// `"Folder / Open"`, `"folder /open"`, and `"folder/open"` all map to the
/// same key. Whitespace not adjacent to a slash is left alone.
pub fn comparison_key(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut chars = lower.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '/' {
            while out.ends_with(|ch: char| ch.is_whitespace()) {
                out.pop();
            }
            out.push('/');
            while chars.peek().is_some_and(|ch| ch.is_whitespace()) {
                chars.next();
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// The `{width, height}` of a trailing `@WxH` suffix, if present.
pub fn parse_size(name: &str) -> Option<IconSize> {
    split_size_suffix(name.trim()).map(|(_, size)| size)
}
