//! Configuration management for gt.
//!
//! This crate finds the `.beads/` directory a command operates on and loads
//! the layered [`config::GtConfig`] that locates the issue snapshot, the wisp
//! sidecar index and the installed formulas.

pub mod beads_dir;
pub mod config;

pub use beads_dir::{find_beads_dir, resolve_beads_dir};
pub use config::{ConfigError, GtConfig, ReadyConfig, load_config};
