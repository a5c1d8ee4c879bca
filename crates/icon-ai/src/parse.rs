//! Parsing and grouping of model output.
//!
//! The model is asked for a flat comma-separated keyword list, optionally
//! with category prefixes (`usage: settings`). Parsing is forgiving: blank
//! items disappear, unknown prefixes are just part of the term.

use serde::{Deserialize, Serialize};

/// One titled group of accepted terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymGroup {
    pub title: String,
    pub terms: Vec<String>,
}

/// Category prefixes recognized in model output, with their display titles.
const GROUP_PREFIXES: [(&str, &str); 4] = [
    ("usage:", "Usage"),
    ("object:", "Object"),
    ("modificator:", "Modificator"),
    ("shapes:", "Shapes"),
];

/// Title of the group collecting terms without a category prefix.
const UNPREFIXED_TITLE: &str = "Keywords";

/// Split a raw comma-separated response into cleaned terms.
pub fn parse_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Group parsed terms by their category prefix.
///
/// Prefix matching is case-insensitive; the prefix is stripped from the
/// stored term. Terms without a recognized prefix land in the `Keywords`
/// group. Groups with no terms are dropped entirely.
pub fn group_terms(terms: &[String]) -> Vec<SynonymGroup> {
    let mut groups: Vec<SynonymGroup> = GROUP_PREFIXES
        .iter()
        .map(|(_, title)| SynonymGroup {
            title: title.to_string(),
            terms: Vec::new(),
        })
        .collect();
    let mut keywords = SynonymGroup {
        title: UNPREFIXED_TITLE.to_string(),
        terms: Vec::new(),
    };

    for term in terms {
        let matched = GROUP_PREFIXES.iter().position(|(prefix, _)| {
            term.get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        });
        match matched {
            Some(i) => {
                let stripped = term[GROUP_PREFIXES[i].0.len()..].trim();
                if !stripped.is_empty() {
                    groups[i].terms.push(stripped.to_string());
                }
            }
            None => keywords.terms.push(term.clone()),
        }
    }

    groups.push(keywords);
    groups.retain(|group| !group.terms.is_empty());
    groups
}
