//! Sidecar index of known wisp IDs.
//!
//! Stores that export an `issues.jsonl` alongside their database mark wisps
//! there. The index catches wisps whose IDs predate the `-wisp-` naming
//! convention. Database-only stores have no such file; that is a normal
//! state and yields no index.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use gt_beads::jsonl::read_jsonl;

use crate::error::Result;

/// The fields of an index record used for wisp classification.
///
/// Everything else on the line is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct WispIndexRecord {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub ephemeral: Option<bool>,

    #[serde(default)]
    pub wisp_type: Option<String>,

    #[serde(default, alias = "type")]
    pub issue_type: Option<String>,
}

impl WispIndexRecord {
    /// Returns `true` if the record describes a wisp.
    pub fn is_wisp(&self) -> bool {
        self.ephemeral == Some(true)
            || self.wisp_type.as_deref().is_some_and(|t| !t.is_empty())
            || self.issue_type.as_deref() == Some("wisp")
    }
}

/// Loads the set of wisp IDs from a JSONL sidecar index.
///
/// Returns `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// Returns [`ReadyError::Io`](crate::ReadyError::Io) if the file cannot be
/// read and [`ReadyError::Index`](crate::ReadyError::Index) for a malformed
/// line.
pub fn load_wisp_index(path: &Path) -> Result<Option<HashSet<String>>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no wisp index");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let ids = read_wisp_ids(BufReader::new(file))?;
    debug!(path = %path.display(), count = ids.len(), "loaded wisp index");
    Ok(Some(ids))
}

/// Collects the IDs of wisp records from a JSONL reader.
pub fn read_wisp_ids<R: BufRead>(reader: R) -> Result<HashSet<String>> {
    let mut ids = HashSet::new();
    for record in read_jsonl::<WispIndexRecord, R>(reader) {
        let record = record?;
        if !record.id.is_empty() && record.is_wisp() {
            ids.insert(record.id);
        }
    }
    Ok(ids)
}
