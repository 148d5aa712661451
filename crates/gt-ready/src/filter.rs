//! The three readiness filters.
//!
//! Each filter consumes the list it is given and returns the retained issues
//! in their original order. All three are idempotent.

use std::collections::HashSet;

use gt_beads::enums::IssueType;
use gt_beads::issue::{Issue, id_infix};

/// Returns `true` if `id` is the root or a step of an installed formula.
///
/// Roots are named `<formula>`, steps `<formula>.<step>`.
pub fn is_formula_scaffold(id: &str, formula_names: &HashSet<String>) -> bool {
    formula_names.contains(id)
        || id
            .match_indices('.')
            .any(|(pos, _)| formula_names.contains(&id[..pos]))
}

/// Returns `true` for molecule instance/step beads and event beads.
pub fn is_molecule_bead(issue: &Issue) -> bool {
    issue.id.contains(id_infix::MOL) || issue.issue_type == IssueType::Event
}

/// Returns `true` if the issue is a wisp by ID pattern or by index lookup.
pub fn is_wisp(issue: &Issue, wisp_ids: Option<&HashSet<String>>) -> bool {
    issue.id.contains(id_infix::WISP) || wisp_ids.is_some_and(|ids| ids.contains(&issue.id))
}

/// Drops formula scaffold beads.
///
/// With no formula names (absent or empty) the input is returned unchanged.
pub fn filter_formula_scaffolds(
    issues: Vec<Issue>,
    formula_names: Option<&HashSet<String>>,
) -> Vec<Issue> {
    let Some(names) = formula_names.filter(|names| !names.is_empty()) else {
        return issues;
    };
    issues
        .into_iter()
        .filter(|issue| !is_formula_scaffold(&issue.id, names))
        .collect()
}

/// Drops molecule beads (`-mol-` in the ID) and event beads.
///
/// Wisps are left for [`filter_wisps`].
pub fn filter_molecule_beads(issues: Vec<Issue>) -> Vec<Issue> {
    issues
        .into_iter()
        .filter(|issue| !is_molecule_bead(issue))
        .collect()
}

/// Drops wisp beads.
///
/// The `-wisp-` ID pattern always applies. When a set of known wisp IDs is
/// available (from the sidecar index) those IDs are dropped as well.
pub fn filter_wisps(issues: Vec<Issue>, wisp_ids: Option<&HashSet<String>>) -> Vec<Issue> {
    issues
        .into_iter()
        .filter(|issue| !is_wisp(issue, wisp_ids))
        .collect()
}
