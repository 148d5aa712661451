//! Issue struct -- the slice of a bead that this workspace reads.
//!
//! The store owns the full record. Only identification, title, type and the
//! free-form description travel through the field codec and the readiness
//! pipeline; `status` is carried so callers can pre-select open work.

use serde::{Deserialize, Serialize};

use crate::enums::{IssueType, Status};

/// A work item as exported by the issue store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, alias = "type", skip_serializing_if = "IssueType::is_default")]
    pub issue_type: IssueType,

    #[serde(default, skip_serializing_if = "Status::is_default")]
    pub status: Status,

    /// Newline-separated text; may hold `key: value` field blocks among prose.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Builder for constructing an [`Issue`] with a fluent API.
pub struct IssueBuilder {
    issue: Issue,
}

impl IssueBuilder {
    /// Creates a new builder with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            issue: Issue {
                id: id.into(),
                ..Issue::default()
            },
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.issue.title = title.into();
        self
    }

    pub fn issue_type(mut self, issue_type: impl Into<IssueType>) -> Self {
        self.issue.issue_type = issue_type.into();
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.issue.status = status;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.issue.description = description.into();
        self
    }

    /// Consumes the builder and returns the constructed [`Issue`].
    pub fn build(self) -> Issue {
        self.issue
    }
}

/// ID infixes used by instantiated workflows.
pub mod id_infix {
    /// Molecule instance and step beads (`asm-mol-4lj`).
    pub const MOL: &str = "-mol-";
    /// Wisp step beads (`hq-wisp-93j`).
    pub const WISP: &str = "-wisp-";
}
