//! Error types for readiness inputs.

use std::io;

use gt_beads::jsonl::JsonlError;

/// Errors raised while loading optional readiness inputs.
///
/// The filters themselves never fail.
#[derive(Debug, thiserror::Error)]
pub enum ReadyError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A sidecar index line was not valid JSON.
    #[error("wisp index line {line}: {source}")]
    Index {
        line: usize,
        source: serde_json::Error,
    },
}

impl From<JsonlError> for ReadyError {
    fn from(err: JsonlError) -> Self {
        match err {
            JsonlError::Io(e) => Self::Io(e),
            JsonlError::Json { line, source } => Self::Index { line, source },
        }
    }
}

/// Result alias for readiness operations.
pub type Result<T> = std::result::Result<T, ReadyError>;
