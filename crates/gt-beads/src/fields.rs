//! Structured `key: value` fields embedded in issue descriptions.
//!
//! Three record kinds live side by side in the same description text:
//!
//! - [`AgentFields`] on agent beads (role, rig, state, hooked work)
//! - [`AttachmentFields`] on pinned/handoff beads (the attached molecule)
//! - [`MrFields`] on merge-request beads (branch, target, outcome)
//!
//! A field line is any line holding a `:`. The key before the first colon is
//! matched case-insensitively in `snake_case`, `kebab-case` or `flat`
//! spelling; the value is the trimmed remainder. Blocks have no header or
//! delimiter, so each kind only ever claims its own keys and leaves every
//! other line alone. Records are always emitted in `snake_case`, one field
//! per line, ahead of the remaining prose.

use serde::{Deserialize, Serialize};

use crate::issue::Issue;

/// A record kind stored as `key: value` lines in a description.
///
/// Implementors only describe their key table and slot access; parsing,
/// formatting and rewriting are shared.
pub trait DescriptionFields: Default + Sized {
    /// Short name of the record kind (`agent`, `attachment`, `mr`).
    const KIND: &'static str;

    /// Canonical `snake_case` keys in emit order.
    const KEYS: &'static [&'static str];

    /// Whether a literal `null` value counts as absent.
    const NULL_IS_ABSENT: bool;

    /// Value stored under a canonical key (empty when absent).
    fn value(&self, key: &str) -> &str;

    /// Mutable slot for a canonical key.
    fn value_mut(&mut self, key: &str) -> Option<&mut String>;

    /// Resolves any accepted spelling of a key to its canonical form.
    fn canonical_key(key: &str) -> Option<&'static str> {
        Self::KEYS
            .iter()
            .copied()
            .find(|canonical| key_matches(key, canonical))
    }

    /// Returns `true` if lines with this key belong to this record kind.
    fn owns_key(key: &str) -> bool {
        Self::canonical_key(key).is_some()
    }

    /// Returns the non-empty value for any accepted spelling of `key`.
    fn get(&self, key: &str) -> Option<&str> {
        Self::canonical_key(key)
            .map(|canonical| self.value(canonical))
            .filter(|v| !v.is_empty())
    }

    /// Sets a field by any accepted key spelling. An empty value clears it.
    ///
    /// Returns `false` if the key is not part of this record kind.
    fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match Self::canonical_key(key).and_then(|canonical| self.value_mut(canonical)) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Returns `true` if every field is empty.
    fn is_empty(&self) -> bool {
        Self::KEYS.iter().all(|key| self.value(key).is_empty())
    }

    /// Parses this record kind out of a description.
    ///
    /// Returns `None` unless at least one recognized key carried a value.
    fn parse_description(description: &str) -> Option<Self> {
        let mut fields = Self::default();
        let mut found = false;

        for (key, value) in description.split('\n').filter_map(split_field_line) {
            if value.is_empty() || (Self::NULL_IS_ABSENT && value.eq_ignore_ascii_case("null")) {
                continue;
            }
            if let Some(slot) = Self::canonical_key(key).and_then(|c| fields.value_mut(c)) {
                *slot = value.to_string();
                found = true;
            }
        }

        found.then_some(fields)
    }

    /// Formats the non-empty fields as `key: value` lines in canonical order.
    fn format(&self) -> String {
        Self::KEYS
            .iter()
            .filter_map(|key| {
                let value = self.value(key);
                (!value.is_empty()).then(|| format!("{}: {}", key, value))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Splits a description line into a trimmed `(key, value)` pair.
///
/// Returns `None` for blank lines and lines without a colon.
fn split_field_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.trim()))
}

/// Compares a key against a canonical `snake_case` key.
///
/// Accepts the snake, kebab and flat spellings, ignoring ASCII case.
fn key_matches(key: &str, canonical: &str) -> bool {
    if key.len() == canonical.len() {
        return key
            .bytes()
            .zip(canonical.bytes())
            .all(|(k, c)| k.to_ascii_lowercase() == c || (c == b'_' && k == b'-'));
    }

    let separators = canonical.bytes().filter(|&b| b == b'_').count();
    separators > 0
        && key.len() + separators == canonical.len()
        && key
            .bytes()
            .map(|b| b.to_ascii_lowercase())
            .eq(canonical.bytes().filter(|&b| b != b'_'))
}

// ---------------------------------------------------------------------------
// Shared operations
// ---------------------------------------------------------------------------

/// Parses a record kind from an issue's description.
pub fn parse_fields<F: DescriptionFields>(issue: &Issue) -> Option<F> {
    if issue.description.is_empty() {
        return None;
    }
    F::parse_description(&issue.description)
}

/// Formats an optional record; `None` and empty records give `""`.
pub fn format_fields<F: DescriptionFields>(fields: Option<&F>) -> String {
    fields.map(F::format).unwrap_or_default()
}

/// Rewrites a description so that it carries exactly `fields` for kind `F`.
///
/// Every line whose key belongs to `F` is dropped; all other lines (prose,
/// blank lines, unknown keys, keys of other record kinds) are kept verbatim.
/// Leading and trailing blank lines of the kept content are removed, the
/// formatted fields go first, and a single blank line separates the two
/// parts when both are present.
pub fn set_fields_in_description<F: DescriptionFields>(
    description: &str,
    fields: Option<&F>,
) -> String {
    let kept: Vec<&str> = description
        .split('\n')
        .filter(|line| !split_field_line(line).is_some_and(|(key, _)| F::owns_key(key)))
        .collect();

    let start = kept
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(kept.len());
    let end = kept
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(start, |idx| idx + 1);
    let other = kept[start..end].join("\n");

    let formatted = format_fields(fields);
    match (formatted.is_empty(), other.is_empty()) {
        (true, _) => other,
        (false, true) => formatted,
        (false, false) => format!("{}\n\n{}", formatted, other),
    }
}

/// Rewrites an issue's description for record kind `F`. See
/// [`set_fields_in_description`].
pub fn set_fields<F: DescriptionFields>(issue: &Issue, fields: Option<&F>) -> String {
    set_fields_in_description(&issue.description, fields)
}

// ---------------------------------------------------------------------------
// Record kinds
// ---------------------------------------------------------------------------

macro_rules! description_fields {
    (
        $(#[$meta:meta])*
        $name:ident, kind = $kind:literal, null_is_absent = $null:literal,
        fields: [
            $( $(#[$fmeta:meta])* ($field:ident, $key:literal) ),+ $(,)?
        ]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                #[serde(default, skip_serializing_if = "String::is_empty")]
                pub $field: String,
            )+
        }

        impl DescriptionFields for $name {
            const KIND: &'static str = $kind;
            const KEYS: &'static [&'static str] = &[$( $key ),+];
            const NULL_IS_ABSENT: bool = $null;

            fn value(&self, key: &str) -> &str {
                match key {
                    $( $key => &self.$field, )+
                    _ => "",
                }
            }

            fn value_mut(&mut self, key: &str) -> Option<&mut String> {
                match key {
                    $( $key => Some(&mut self.$field), )+
                    _ => None,
                }
            }
        }
    };
}

description_fields! {
    /// State an agent bead reports about itself.
    ///
    /// `rig` and `hook_bead` are commonly written as `null` when unset; for
    /// this kind `null` reads as absent.
    AgentFields, kind = "agent", null_is_absent = true,
    fields: [
        /// mayor, deacon, witness, refinery, polecat
        (role_type, "role_type"),
        (rig, "rig"),
        /// idle, running, working, stopped
        (agent_state, "agent_state"),
        /// Bead currently on the agent's hook.
        (hook_bead, "hook_bead"),
        /// Role definition bead.
        (role_bead, "role_bead"),
    ]
}

description_fields! {
    /// Molecule attachment on a pinned bead.
    AttachmentFields, kind = "attachment", null_is_absent = false,
    fields: [
        /// Root issue ID of the attached molecule.
        (attached_molecule, "attached_molecule"),
        /// ISO 8601 timestamp of the attach.
        (attached_at, "attached_at"),
        /// Free-text args passed along with the attach.
        (attached_args, "attached_args"),
    ]
}

description_fields! {
    /// Merge-request metadata.
    MrFields, kind = "mr", null_is_absent = false,
    fields: [
        /// Source branch, e.g. `polecat/Nux/gt-xyz`.
        (branch, "branch"),
        /// Target branch, e.g. `main` or `integration/gt-epic`.
        (target, "target"),
        /// Work item being merged.
        (source_issue, "source_issue"),
        (worker, "worker"),
        (rig, "rig"),
        /// SHA of the merge commit, set on close.
        (merge_commit, "merge_commit"),
        /// merged, rejected, conflict, superseded
        (close_reason, "close_reason"),
    ]
}

// ---------------------------------------------------------------------------
// Named entry points
// ---------------------------------------------------------------------------

/// Extracts agent fields from an issue. `None` if there are none.
pub fn parse_agent_fields(issue: &Issue) -> Option<AgentFields> {
    parse_fields(issue)
}

pub fn parse_agent_fields_from_description(description: &str) -> Option<AgentFields> {
    AgentFields::parse_description(description)
}

pub fn format_agent_fields(fields: Option<&AgentFields>) -> String {
    format_fields(fields)
}

/// Returns the issue's description with its agent block replaced by `fields`.
pub fn set_agent_fields(issue: &Issue, fields: Option<&AgentFields>) -> String {
    set_fields(issue, fields)
}

/// Extracts attachment fields from an issue. `None` if there are none.
pub fn parse_attachment_fields(issue: &Issue) -> Option<AttachmentFields> {
    parse_fields(issue)
}

pub fn parse_attachment_fields_from_description(description: &str) -> Option<AttachmentFields> {
    AttachmentFields::parse_description(description)
}

pub fn format_attachment_fields(fields: Option<&AttachmentFields>) -> String {
    format_fields(fields)
}

/// Returns the issue's description with its attachment block replaced by `fields`.
pub fn set_attachment_fields(issue: &Issue, fields: Option<&AttachmentFields>) -> String {
    set_fields(issue, fields)
}

/// Extracts merge-request fields from an issue. `None` if there are none.
pub fn parse_mr_fields(issue: &Issue) -> Option<MrFields> {
    parse_fields(issue)
}

pub fn parse_mr_fields_from_description(description: &str) -> Option<MrFields> {
    MrFields::parse_description(description)
}

pub fn format_mr_fields(fields: Option<&MrFields>) -> String {
    format_fields(fields)
}

/// Returns the issue's description with its MR block replaced by `fields`.
pub fn set_mr_fields(issue: &Issue, fields: Option<&MrFields>) -> String {
    set_fields(issue, fields)
}
