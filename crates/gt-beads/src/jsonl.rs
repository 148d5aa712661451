//! JSONL (JSON Lines) reading.
//!
//! Each line is one complete JSON object. The store's snapshot export holds
//! one [`Issue`](crate::issue::Issue) per line; the reader is generic so that
//! sidecar indexes with a narrower record shape can share it.

use std::io::{self, BufRead};
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::issue::Issue;

/// Error type for JSONL operations.
#[derive(Debug, thiserror::Error)]
pub enum JsonlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error at line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
}

/// Result alias for JSONL operations.
pub type Result<T> = std::result::Result<T, JsonlError>;

/// Returns an iterator that reads records from a JSONL reader.
///
/// Blank lines are skipped. Errors carry the 1-based line number.
pub fn read_jsonl<T: DeserializeOwned, R: BufRead>(reader: R) -> JsonlIter<R, T> {
    JsonlIter {
        reader,
        line_number: 0,
        _record: PhantomData,
    }
}

/// Reads every issue from a JSONL reader, stopping at the first error.
pub fn read_issues<R: BufRead>(reader: R) -> Result<Vec<Issue>> {
    read_jsonl(reader).collect()
}

/// Iterator over JSONL-encoded records.
pub struct JsonlIter<R, T> {
    reader: R,
    line_number: usize,
    _record: PhantomData<fn() -> T>,
}

impl<R: BufRead, T: DeserializeOwned> Iterator for JsonlIter<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return Some(serde_json::from_str::<T>(trimmed).map_err(|e| {
                        JsonlError::Json {
                            line: self.line_number,
                            source: e,
                        }
                    }));
                }
                Err(e) => return Some(Err(JsonlError::Io(e))),
            }
        }
    }
}
