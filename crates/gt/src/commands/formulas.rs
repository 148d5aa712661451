//! `gt formulas` -- list installed formula names.

use anyhow::Result;

use gt_ready::formulas::{FORMULAS_DIR, discover_formula_names};

use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `gt formulas` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let (beads_dir, config) = ctx.load()?;
    let root = config.formulas_root(&beads_dir);

    let mut names: Vec<String> = discover_formula_names(&root)
        .map(|names| names.into_iter().collect())
        .unwrap_or_default();
    names.sort();

    if ctx.json {
        output_json(&names);
        return Ok(());
    }

    if names.is_empty() {
        if !ctx.quiet {
            println!("No formulas installed in {}", root.join(FORMULAS_DIR).display());
        }
        return Ok(());
    }

    for name in &names {
        println!("{}", name);
    }
    Ok(())
}
