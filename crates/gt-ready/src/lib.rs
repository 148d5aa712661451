//! Readiness filtering for beads.
//!
//! A store's ready list still contains beads nobody should be dispatched to:
//! scaffolds of installed formulas, molecule instances and their steps,
//! event beads, and wisps. This crate strips them in three stages:
//!
//! 1. [`filter::filter_formula_scaffolds`] using the names found by
//!    [`formulas::discover_formula_names`]
//! 2. [`filter::filter_molecule_beads`]
//! 3. [`filter::filter_wisps`], optionally backed by a sidecar index loaded
//!    with [`wisp_index::load_wisp_index`]
//!
//! [`pipeline::ready`] composes the three.

pub mod error;
pub mod filter;
pub mod formulas;
pub mod pipeline;
pub mod wisp_index;

pub use error::{ReadyError, Result};
pub use pipeline::{ReadyReport, ready, ready_with_report};
