//! Issue records and the description field codec.
//!
//! - [`issue`]: the slice of a bead read by the rest of the workspace
//! - [`fields`]: agent / attachment / merge-request `key: value` blocks
//!   embedded in descriptions
//! - [`jsonl`]: reading issue snapshots as JSON Lines

pub mod enums;
pub mod fields;
pub mod issue;
pub mod jsonl;
