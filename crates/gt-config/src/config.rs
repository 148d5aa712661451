//! Configuration types and loading for gt.
//!
//! [`GtConfig`] is layered with `figment`: built-in defaults, then
//! `.beads/config.yaml`, then `GT_`-prefixed environment variables
//! (`GT_READY__LIMIT=5` sets `ready.limit`). Relative paths are resolved
//! against the `.beads/` directory.

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file inside `.beads/`.
pub const CONFIG_FILE: &str = "config.yaml";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "GT_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The layered configuration could not be extracted.
    #[error("failed to load configuration: {0}")]
    Figment(#[from] figment::Error),

    /// The `.beads/` directory was not found.
    #[error("no .beads directory found (set BEADS_DIR or pass --beads-dir)")]
    BeadsDirNotFound,

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Config sections
// ---------------------------------------------------------------------------

/// Inputs of the `ready` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyConfig {
    /// Issue snapshot (JSONL), relative to `.beads/`.
    #[serde(default = "default_issues_file")]
    pub snapshot: String,

    /// Wisp sidecar index (JSONL), relative to `.beads/`.
    #[serde(default = "default_issues_file")]
    pub wisp_index: String,

    /// Directory containing `formulas/`; defaults to `.beads/` itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formulas_root: Option<String>,

    /// Maximum issues to list; `0` lists all.
    #[serde(default)]
    pub limit: usize,
}

impl Default for ReadyConfig {
    fn default() -> Self {
        Self {
            snapshot: default_issues_file(),
            wisp_index: default_issues_file(),
            formulas_root: None,
            limit: 0,
        }
    }
}

fn default_issues_file() -> String {
    "issues.jsonl".to_string()
}

/// The full gt configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GtConfig {
    /// Readiness pipeline inputs.
    #[serde(default)]
    pub ready: ReadyConfig,
}

impl GtConfig {
    /// Path of the issue snapshot.
    pub fn snapshot_path(&self, beads_dir: &Path) -> PathBuf {
        beads_dir.join(&self.ready.snapshot)
    }

    /// Path of the wisp sidecar index.
    pub fn wisp_index_path(&self, beads_dir: &Path) -> PathBuf {
        beads_dir.join(&self.ready.wisp_index)
    }

    /// Directory expected to contain `formulas/`.
    pub fn formulas_root(&self, beads_dir: &Path) -> PathBuf {
        match &self.ready.formulas_root {
            Some(root) => beads_dir.join(root),
            None => beads_dir.to_path_buf(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.ready.snapshot.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "ready.snapshot".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.ready.wisp_index.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "ready.wisp_index".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Builds the layered configuration source for a `.beads/` directory.
///
/// An absent or empty `config.yaml` contributes nothing.
pub fn figment(beads_dir: &Path) -> Result<Figment> {
    let mut figment = Figment::from(Serialized::defaults(GtConfig::default()));

    let config_path = beads_dir.join(CONFIG_FILE);
    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        if !content.trim().is_empty() {
            figment = figment.merge(Yaml::string(&content));
        }
    }

    Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
}

/// Load configuration for the given `.beads/` directory.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
/// [`ConfigError::Figment`] if a layer holds invalid values, or
/// [`ConfigError::InvalidValue`] if validation fails.
pub fn load_config(beads_dir: &Path) -> Result<GtConfig> {
    let config: GtConfig = figment(beads_dir)?.extract()?;
    config.validate()?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
