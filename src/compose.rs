//! Description text composition from accepted synonym groups.

use icon_ai::SynonymGroup;

/// Compose the description written back to a component.
///
/// Each non-empty group becomes one `Title: a, b, c` line. The lines are
/// appended below any existing description; with no existing description
/// they stand alone. With no usable groups the existing text is returned
/// unchanged.
pub fn compose_description(existing: &str, groups: &[SynonymGroup]) -> String {
    let lines: Vec<String> = groups
        .iter()
        .filter(|group| !group.terms.is_empty())
        .map(|group| format!("{}: {}", group.title, group.terms.join(", ")))
        .collect();

    let existing = existing.trim();
    if lines.is_empty() {
        return existing.to_string();
    }
    if existing.is_empty() {
        lines.join("\n")
    } else {
        format!("{}\n{}", existing, lines.join("\n"))
    }
}
