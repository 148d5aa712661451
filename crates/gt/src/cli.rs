//! Clap CLI definitions for the `gt` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// gt -- workflow assistant for a beads issue store.
///
/// Lists dispatchable work and reads or rewrites the structured fields that
/// agents, attachments and merge requests keep in issue descriptions.
#[derive(Parser, Debug)]
#[command(
    name = "gt",
    about = "Workflow assistant for a beads issue store",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Beads directory (default: auto-discover .beads/ upwards from cwd).
    #[arg(long, global = true, env = "BEADS_DIR")]
    pub beads_dir: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show dispatchable work (no scaffolds, molecules, events or wisps).
    Ready(ReadyArgs),

    /// Read or rewrite structured description fields.
    Fields(FieldsArgs),

    /// List installed formula names.
    Formulas,
}

/// Arguments for `gt ready`.
#[derive(Args, Debug)]
pub struct ReadyArgs {
    /// Consider issues in every status, not only open ones.
    #[arg(long)]
    pub all_statuses: bool,

    /// Ignore the wisp sidecar index (detect wisps by ID pattern only).
    #[arg(long)]
    pub no_wisp_index: bool,

    /// Maximum issues to show (0 = all; default from config).
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Record kinds stored in descriptions.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Agent,
    Attachment,
    Mr,
}

/// Record kinds accepted by `gt fields show`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowKind {
    Agent,
    Attachment,
    Mr,
    #[default]
    All,
}

impl ShowKind {
    /// The record kinds this selection covers, in display order.
    pub fn kinds(self) -> &'static [FieldKind] {
        match self {
            ShowKind::Agent => &[FieldKind::Agent],
            ShowKind::Attachment => &[FieldKind::Attachment],
            ShowKind::Mr => &[FieldKind::Mr],
            ShowKind::All => &[FieldKind::Agent, FieldKind::Attachment, FieldKind::Mr],
        }
    }
}

/// Arguments for `gt fields`.
#[derive(Args, Debug)]
pub struct FieldsArgs {
    #[command(subcommand)]
    pub command: FieldsCommands,
}

/// Fields subcommands.
#[derive(Subcommand, Debug)]
pub enum FieldsCommands {
    /// Show the field records found in an issue's description.
    Show(FieldsShowArgs),
    /// Print an issue's description with one record kind replaced.
    Set(FieldsSetArgs),
}

/// Arguments for `gt fields show`.
#[derive(Args, Debug)]
pub struct FieldsShowArgs {
    /// Issue ID.
    pub id: String,

    /// Record kind to show.
    #[arg(short = 'k', long, value_enum, default_value_t = ShowKind::All)]
    pub kind: ShowKind,
}

/// Arguments for `gt fields set`.
#[derive(Args, Debug)]
pub struct FieldsSetArgs {
    /// Issue ID.
    pub id: String,

    /// Record kind to rewrite.
    #[arg(short = 'k', long, value_enum)]
    pub kind: FieldKind,

    /// Field assignments as KEY=VALUE (an empty VALUE clears the field).
    #[arg(value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,

    /// Start from an empty record instead of the parsed one.
    #[arg(long)]
    pub clear: bool,
}
