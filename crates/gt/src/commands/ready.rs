//! `gt ready` -- show dispatchable work.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use tracing::{debug, warn};

use gt_beads::enums::Status;
use gt_beads::issue::Issue;
use gt_ready::ready_with_report;
use gt_ready::wisp_index::load_wisp_index;

use crate::cli::ReadyArgs;
use crate::commands::load_snapshot;
use crate::context::RuntimeContext;
use crate::output::{format_issue_compact, output_json};

/// Execute the `gt ready` command.
pub fn run(ctx: &RuntimeContext, args: &ReadyArgs) -> Result<()> {
    let (beads_dir, config) = ctx.load()?;
    let issues = load_snapshot(&config.snapshot_path(&beads_dir))?;

    let candidates: Vec<Issue> = if args.all_statuses {
        issues
    } else {
        issues
            .into_iter()
            .filter(|issue| issue.status == Status::Open)
            .collect()
    };

    let wisp_ids = if args.no_wisp_index {
        None
    } else {
        wisp_index_or_none(&config.wisp_index_path(&beads_dir))
    };

    let (mut ready, report) =
        ready_with_report(candidates, &config.formulas_root(&beads_dir), wisp_ids.as_ref());
    debug!(?report, "readiness pipeline finished");

    let limit = args.limit.unwrap_or(config.ready.limit);
    if limit > 0 {
        ready.truncate(limit);
    }

    if ctx.json {
        output_json(&ready);
        return Ok(());
    }

    if ctx.quiet {
        for issue in &ready {
            println!("{}", issue.id);
        }
        return Ok(());
    }

    if ready.is_empty() {
        println!("\nNo ready work found\n");
        return Ok(());
    }

    println!("\nReady work ({} issues):\n", ready.len());
    for (i, issue) in ready.iter().enumerate() {
        println!("{}. {}", i + 1, format_issue_compact(issue));
    }
    println!();

    Ok(())
}

/// A broken sidecar index only costs index-based wisp detection.
fn wisp_index_or_none(path: &Path) -> Option<HashSet<String>> {
    match load_wisp_index(path) {
        Ok(ids) => ids,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable wisp index");
            None
        }
    }
}
