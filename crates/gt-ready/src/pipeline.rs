//! Composition of the readiness filters.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use gt_beads::issue::Issue;

use crate::filter::{filter_formula_scaffolds, filter_molecule_beads, filter_wisps};
use crate::formulas::discover_formula_names;

/// What each stage of the pipeline removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadyReport {
    /// Issues handed to the pipeline.
    pub input: usize,
    /// Number of formula names known, `None` if the formulas directory was
    /// unavailable.
    pub formula_names: Option<usize>,
    /// Number of IDs in the wisp index, `None` if there was no index.
    pub wisp_index: Option<usize>,
    pub scaffolds_removed: usize,
    pub molecules_removed: usize,
    pub wisps_removed: usize,
    /// Issues left after all stages.
    pub ready: usize,
}

/// Returns the dispatchable subset of `issues`.
///
/// Formula names are discovered under `formulas_root/formulas/`; the wisp
/// index is optional. Input order is preserved.
pub fn ready(
    issues: Vec<Issue>,
    formulas_root: &Path,
    wisp_index: Option<&HashSet<String>>,
) -> Vec<Issue> {
    ready_with_report(issues, formulas_root, wisp_index).0
}

/// Like [`ready`], also reporting what each stage removed.
pub fn ready_with_report(
    issues: Vec<Issue>,
    formulas_root: &Path,
    wisp_index: Option<&HashSet<String>>,
) -> (Vec<Issue>, ReadyReport) {
    let formula_names = discover_formula_names(formulas_root);
    filter_ready(issues, formula_names.as_ref(), wisp_index)
}

/// Runs the three filters against already-resolved inputs.
pub fn filter_ready(
    issues: Vec<Issue>,
    formula_names: Option<&HashSet<String>>,
    wisp_index: Option<&HashSet<String>>,
) -> (Vec<Issue>, ReadyReport) {
    let mut report = ReadyReport {
        input: issues.len(),
        formula_names: formula_names.map(HashSet::len),
        wisp_index: wisp_index.map(HashSet::len),
        ..ReadyReport::default()
    };

    let before = issues.len();
    let issues = filter_formula_scaffolds(issues, formula_names);
    report.scaffolds_removed = before - issues.len();
    debug!(removed = report.scaffolds_removed, "filtered formula scaffolds");

    let before = issues.len();
    let issues = filter_molecule_beads(issues);
    report.molecules_removed = before - issues.len();
    debug!(removed = report.molecules_removed, "filtered molecule beads");

    let before = issues.len();
    let issues = filter_wisps(issues, wisp_index);
    report.wisps_removed = before - issues.len();
    debug!(
        removed = report.wisps_removed,
        indexed = wisp_index.is_some(),
        "filtered wisps"
    );

    report.ready = issues.len();
    (issues, report)
}
