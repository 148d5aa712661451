//! Command handlers, one module per subcommand.

pub mod fields;
pub mod formulas;
pub mod ready;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

use gt_beads::issue::Issue;
use gt_beads::jsonl::read_issues;

/// Load the issue snapshot at `path`.
pub fn load_snapshot(path: &Path) -> Result<Vec<Issue>> {
    if !path.exists() {
        bail!(
            "no issue snapshot found at {}\nHint: export the store to JSONL or set ready.snapshot in config.yaml",
            path.display()
        );
    }
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let issues = read_issues(BufReader::new(file))
        .with_context(|| format!("failed to read issue snapshot {}", path.display()))?;
    debug!(path = %path.display(), count = issues.len(), "loaded issue snapshot");
    Ok(issues)
}

/// Find an issue by exact ID.
pub fn find_issue<'a>(issues: &'a [Issue], id: &str) -> Result<&'a Issue> {
    issues
        .iter()
        .find(|issue| issue.id == id)
        .with_context(|| format!("issue '{}' not found", id))
}
