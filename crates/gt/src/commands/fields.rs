//! `gt fields` -- read or rewrite the structured fields in a description.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::{Map, Value, json};

use gt_beads::fields::{
    AgentFields, AttachmentFields, DescriptionFields, MrFields, parse_fields, set_fields,
};
use gt_beads::issue::Issue;

use crate::cli::{FieldKind, FieldsSetArgs, FieldsShowArgs};
use crate::commands::{find_issue, load_snapshot};
use crate::context::RuntimeContext;
use crate::output::{output_json, output_table};

/// Execute `gt fields show`.
pub fn run_show(ctx: &RuntimeContext, args: &FieldsShowArgs) -> Result<()> {
    let (beads_dir, config) = ctx.load()?;
    let issues = load_snapshot(&config.snapshot_path(&beads_dir))?;
    let issue = find_issue(&issues, &args.id)?;

    if ctx.json {
        let mut out = Map::new();
        out.insert("id".to_string(), json!(issue.id));
        for kind in args.kind.kinds() {
            let (name, value) = match kind {
                FieldKind::Agent => record_json::<AgentFields>(issue)?,
                FieldKind::Attachment => record_json::<AttachmentFields>(issue)?,
                FieldKind::Mr => record_json::<MrFields>(issue)?,
            };
            out.insert(name.to_string(), value);
        }
        output_json(&out);
        return Ok(());
    }

    let mut shown = false;
    for kind in args.kind.kinds() {
        shown |= match kind {
            FieldKind::Agent => print_record::<AgentFields>(issue, shown),
            FieldKind::Attachment => print_record::<AttachmentFields>(issue, shown),
            FieldKind::Mr => print_record::<MrFields>(issue, shown),
        };
    }
    if !shown && !ctx.quiet {
        println!("{}: no description fields", issue.id);
    }
    Ok(())
}

/// Execute `gt fields set`.
pub fn run_set(ctx: &RuntimeContext, args: &FieldsSetArgs) -> Result<()> {
    let (beads_dir, config) = ctx.load()?;
    let issues = load_snapshot(&config.snapshot_path(&beads_dir))?;
    let issue = find_issue(&issues, &args.id)?;

    match args.kind {
        FieldKind::Agent => set_record::<AgentFields>(ctx, issue, args),
        FieldKind::Attachment => set_record::<AttachmentFields>(ctx, issue, args),
        FieldKind::Mr => set_record::<MrFields>(ctx, issue, args),
    }
}

fn record_json<F: DescriptionFields + Serialize>(issue: &Issue) -> Result<(&'static str, Value)> {
    let value = serde_json::to_value(parse_fields::<F>(issue))
        .with_context(|| format!("failed to serialize {} fields", F::KIND))?;
    Ok((F::KIND, value))
}

/// Prints one record kind as a table. Returns `false` if the issue has none.
fn print_record<F: DescriptionFields>(issue: &Issue, separate: bool) -> bool {
    let Some(fields) = parse_fields::<F>(issue) else {
        return false;
    };
    let rows: Vec<Vec<String>> = F::KEYS
        .iter()
        .filter_map(|key| fields.get(key).map(|value| vec![key.to_string(), value.to_string()]))
        .collect();

    if separate {
        println!();
    }
    println!("{} fields:", F::KIND);
    output_table(&["KEY", "VALUE"], &rows);
    true
}

fn set_record<F: DescriptionFields + Serialize>(
    ctx: &RuntimeContext,
    issue: &Issue,
    args: &FieldsSetArgs,
) -> Result<()> {
    let mut fields = if args.clear {
        F::default()
    } else {
        parse_fields::<F>(issue).unwrap_or_default()
    };
    apply_assignments(&mut fields, &args.assignments)?;

    let description = set_fields(issue, Some(&fields));

    if ctx.json {
        output_json(&json!({
            "id": issue.id,
            "kind": F::KIND,
            "fields": fields,
            "description": description,
        }));
        return Ok(());
    }

    println!("{}", description);
    Ok(())
}

/// Applies `KEY=VALUE` overrides. Any accepted key spelling works; an empty
/// value clears the field. Values must fit on one description line.
fn apply_assignments<F: DescriptionFields>(fields: &mut F, assignments: &[String]) -> Result<()> {
    for assignment in assignments {
        let Some((key, value)) = assignment.split_once('=') else {
            bail!("invalid assignment '{}': expected KEY=VALUE", assignment);
        };
        if value.contains(['\n', '\r']) {
            bail!(
                "invalid value for {} field '{}': must be a single line",
                F::KIND,
                key.trim()
            );
        }
        if !fields.set(key.trim(), value.trim()) {
            bail!(
                "unknown {} field '{}' (expected one of: {})",
                F::KIND,
                key.trim(),
                F::KEYS.join(", ")
            );
        }
    }
    Ok(())
}
