//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what every command handler needs: the
//! explicit beads directory (if any) and the global output flags.

use std::path::PathBuf;

use anyhow::{Context, Result};

use gt_config::{GtConfig, load_config, resolve_beads_dir};

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Explicit `.beads` directory from `--beads-dir` / `BEADS_DIR`.
    pub beads_dir: Option<PathBuf>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        Self {
            beads_dir: global.beads_dir.clone(),
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        }
    }

    /// Returns the `.beads` directory, auto-discovering it from the cwd.
    pub fn resolve_beads_dir(&self) -> Result<PathBuf> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        resolve_beads_dir(self.beads_dir.as_deref(), &cwd).context(
            "no beads directory found. Run inside a project with a .beads/ directory or pass --beads-dir.",
        )
    }

    /// Resolves the beads directory and loads its configuration.
    pub fn load(&self) -> Result<(PathBuf, GtConfig)> {
        let beads_dir = self.resolve_beads_dir()?;
        let config = load_config(&beads_dir)
            .with_context(|| format!("failed to load config from {}", beads_dir.display()))?;
        Ok((beads_dir, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(beads_dir: Option<PathBuf>) -> RuntimeContext {
        RuntimeContext {
            beads_dir,
            json: false,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn explicit_beads_dir_is_used() {
        let tmp = tempfile::tempdir().unwrap();
        let (dir, config) = ctx(Some(tmp.path().to_path_buf())).load().unwrap();
        assert_eq!(dir, tmp.path());
        assert_eq!(config, GtConfig::default());
    }

    #[test]
    fn missing_explicit_dir_is_an_error() {
        let err = ctx(Some(PathBuf::from("/nonexistent/.beads")))
            .resolve_beads_dir()
            .unwrap_err();
        assert!(format!("{:#}", err).contains("no beads directory found"));
    }
}
