//! Discovery of the `.beads/` directory.
//!
//! The `.beads/` directory holds the issue snapshot, the optional wisp
//! sidecar index, installed formulas and `config.yaml`. It is found by
//! walking up from a start directory unless `BEADS_DIR` points elsewhere.

use crate::config::ConfigError;
use std::path::{Path, PathBuf};

/// The name of the beads metadata directory.
pub const BEADS_DIR_NAME: &str = ".beads";

/// Environment variable that overrides discovery.
pub const BEADS_DIR_ENV: &str = "BEADS_DIR";

/// Walk up the directory tree from `start` looking for a `.beads/` directory.
///
/// `BEADS_DIR` is honoured first when it names an existing directory.
///
/// # Examples
///
/// ```no_run
/// use gt_config::beads_dir::find_beads_dir;
/// use std::path::Path;
///
/// if let Some(dir) = find_beads_dir(Path::new(".")) {
///     println!("Found beads dir at {}", dir.display());
/// }
/// ```
pub fn find_beads_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(BEADS_DIR_ENV) {
        let env_path = PathBuf::from(&env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }
    find_beads_dir_from(start)
}

/// Walk up from `start` without consulting the environment.
pub fn find_beads_dir_from(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(BEADS_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Resolve the beads directory: an explicit path wins, otherwise discover.
///
/// # Errors
///
/// Returns [`ConfigError::BeadsDirNotFound`] if nothing is found, or if the
/// explicit path is not a directory.
pub fn resolve_beads_dir(explicit: Option<&Path>, start: &Path) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) if path.is_dir() => Ok(path.to_path_buf()),
        Some(_) => Err(ConfigError::BeadsDirNotFound),
        None => find_beads_dir(start).ok_or(ConfigError::BeadsDirNotFound),
    }
}
