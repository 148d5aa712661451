//! Discovery of installed formula names.
//!
//! Installed formulas live as `<name>.formula.toml` files in a `formulas/`
//! directory. Only their base names matter here: a formula's root bead is
//! named `<name>` and its steps `<name>.<step>`.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

/// Directory under the formulas root holding installed formulas.
pub const FORMULAS_DIR: &str = "formulas";

/// File suffix of an installed formula.
pub const FORMULA_SUFFIX: &str = ".formula.toml";

/// Base names of the installed formulas.
pub type FormulaNameSet = HashSet<String>;

/// Lists the formula base names installed under `root/formulas/`.
///
/// Only regular files ending in `.formula.toml` count; everything else
/// (`.installed.json`, subdirectories, other files) is skipped and
/// subdirectories are not entered. Returns `None` when the directory is
/// missing or cannot be listed, which callers treat as "no formulas known".
pub fn discover_formula_names(root: &Path) -> Option<FormulaNameSet> {
    let dir = root.join(FORMULAS_DIR);
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "formulas directory not readable");
            return None;
        }
    };

    let names: FormulaNameSet = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| formula_name(&entry.file_name().to_string_lossy()))
        .collect();

    debug!(dir = %dir.display(), count = names.len(), "discovered formula names");
    Some(names)
}

/// Strips the formula suffix from a file name.
///
/// Returns `None` for names without the suffix, or with nothing before it.
pub fn formula_name(file_name: &str) -> Option<String> {
    file_name
        .strip_suffix(FORMULA_SUFFIX)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
