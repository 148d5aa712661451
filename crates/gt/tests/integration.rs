//! End-to-end CLI integration tests for the `gt` binary.
//!
//! Each test creates its own temporary `.beads/` project with an issue
//! snapshot and installed formulas, and runs `gt` as a subprocess via
//! `assert_cmd`.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const SNAPSHOT: &str = r#"{"id":"mol-deacon-patrol","title":"Deacon patrol","issue_type":"epic"}
{"id":"mol-deacon-patrol.inbox-check","title":"Inbox check"}
{"id":"hq-cv-rg22g","title":"Convoy work"}
{"id":"asm-mol-4lj","title":"Molecule instance","issue_type":"epic"}

{"id":"hq-wisp-93j","title":"Patrol wisp"}
{"id":"hq-f29k","title":"Session ended","type":"event"}
{"id":"hq-special","title":"Old-style wisp","ephemeral":true}
{"id":"gt-456","title":"Fix login","issue_type":"bug"}
{"id":"gt-789","title":"Already done","status":"closed"}
{"id":"gt-mr1","title":"Merge gt-456","issue_type":"merge-request","description":"branch: polecat/nux/gt-456\ntarget: main\n\nFree prose here."}
{"id":"gt-agent","title":"Deacon","issue_type":"agent","description":"role_type: deacon\nagent_state: working\nhook_bead: null"}
"#;

/// Build a `Command` targeting the cargo-built `gt` binary.
fn gt() -> Command {
    let mut cmd = Command::cargo_bin("gt").unwrap();
    cmd.env_remove("BEADS_DIR")
        .env_remove("GT_READY__LIMIT")
        .env_remove("RUST_LOG");
    cmd
}

/// Create a project with a populated `.beads/` directory.
fn init_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let beads = tmp.path().join(".beads");
    fs::create_dir_all(beads.join("formulas")).unwrap();
    fs::write(beads.join("issues.jsonl"), SNAPSHOT).unwrap();
    fs::write(
        beads.join("formulas").join("mol-deacon-patrol.formula.toml"),
        "formula = \"mol-deacon-patrol\"\n",
    )
    .unwrap();
    fs::write(beads.join("formulas").join(".installed.json"), "{}").unwrap();
    tmp
}

fn beads_dir(tmp: &TempDir) -> PathBuf {
    tmp.path().join(".beads")
}

/// Run `gt --beads-dir <project> <args> --json` and parse stdout.
fn run_json(tmp: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = gt()
        .arg("--beads-dir")
        .arg(beads_dir(tmp))
        .args(args)
        .arg("--json")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "gt {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn ids(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|issue| issue["id"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// gt ready
// ---------------------------------------------------------------------------

#[test]
fn ready_hides_scaffolds_molecules_events_and_wisps() {
    let tmp = init_project();
    let ready = run_json(&tmp, &["ready"]);
    assert_eq!(ids(&ready), vec!["hq-cv-rg22g", "gt-456", "gt-mr1", "gt-agent"]);
}

#[test]
fn ready_all_statuses_includes_closed() {
    let tmp = init_project();
    let ready = run_json(&tmp, &["ready", "--all-statuses"]);
    assert_eq!(
        ids(&ready),
        vec!["hq-cv-rg22g", "gt-456", "gt-789", "gt-mr1", "gt-agent"]
    );
}

#[test]
fn ready_without_wisp_index_keeps_unmarked_ids() {
    let tmp = init_project();
    let ready = run_json(&tmp, &["ready", "--no-wisp-index"]);
    assert_eq!(
        ids(&ready),
        vec!["hq-cv-rg22g", "hq-special", "gt-456", "gt-mr1", "gt-agent"]
    );
}

#[test]
fn ready_without_formulas_keeps_scaffolds() {
    let tmp = init_project();
    fs::remove_dir_all(beads_dir(&tmp).join("formulas")).unwrap();
    let ready = run_json(&tmp, &["ready"]);
    assert_eq!(
        ids(&ready),
        vec![
            "mol-deacon-patrol",
            "mol-deacon-patrol.inbox-check",
            "hq-cv-rg22g",
            "gt-456",
            "gt-mr1",
            "gt-agent",
        ]
    );
}

#[test]
fn ready_limit_flag_and_config() {
    let tmp = init_project();
    assert_eq!(ids(&run_json(&tmp, &["ready", "-n", "2"])), vec!["hq-cv-rg22g", "gt-456"]);

    fs::write(beads_dir(&tmp).join("config.yaml"), "ready:\n  limit: 1\n").unwrap();
    assert_eq!(ids(&run_json(&tmp, &["ready"])), vec!["hq-cv-rg22g"]);

    // The flag overrides the config; 0 means unlimited.
    assert_eq!(ids(&run_json(&tmp, &["ready", "--limit", "0"])).len(), 4);
}

#[test]
fn ready_limit_from_environment() {
    let tmp = init_project();
    let output = gt()
        .env("GT_READY__LIMIT", "3")
        .arg("--beads-dir")
        .arg(beads_dir(&tmp))
        .args(["ready", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let ready: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(ids(&ready), vec!["hq-cv-rg22g", "gt-456", "gt-mr1"]);
}

#[test]
fn ready_human_output_lists_issues() {
    let tmp = init_project();
    gt().arg("--beads-dir")
        .arg(beads_dir(&tmp))
        .arg("ready")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ready work (4 issues):"))
        .stdout(predicate::str::contains("2. [bug] gt-456: Fix login (open)"))
        .stdout(predicate::str::contains("mol-deacon-patrol").not());
}

#[test]
fn ready_quiet_prints_ids_only() {
    let tmp = init_project();
    gt().arg("--beads-dir")
        .arg(beads_dir(&tmp))
        .args(["-q", "ready"])
        .assert()
        .success()
        .stdout("hq-cv-rg22g\ngt-456\ngt-mr1\ngt-agent\n");
}

#[test]
fn ready_discovers_beads_dir_from_cwd() {
    let tmp = init_project();
    let nested = tmp.path().join("src").join("deep");
    fs::create_dir_all(&nested).unwrap();
    gt().args(["-q", "ready"])
        .current_dir(&nested)
        .assert()
        .success()
        .stdout(predicate::str::contains("gt-456"));
}

#[test]
fn ready_verbose_logs_report_to_stderr() {
    let tmp = init_project();
    gt().arg("--beads-dir")
        .arg(beads_dir(&tmp))
        .args(["-v", "-q", "ready"])
        .assert()
        .success()
        .stderr(predicate::str::contains("readiness pipeline finished"));
}

#[test]
fn ready_tolerates_malformed_wisp_index() {
    let tmp = init_project();
    fs::write(
        beads_dir(&tmp).join("config.yaml"),
        "ready:\n  wisp_index: wisps.jsonl\n",
    )
    .unwrap();
    fs::write(beads_dir(&tmp).join("wisps.jsonl"), "not json\n").unwrap();
    let ready = run_json(&tmp, &["ready"]);
    assert!(ids(&ready).contains(&"hq-special".to_string()));
}

#[test]
fn malformed_wisp_index_warns_without_verbose() {
    let tmp = init_project();
    fs::write(
        beads_dir(&tmp).join("config.yaml"),
        "ready:\n  wisp_index: wisps.jsonl\n",
    )
    .unwrap();
    fs::write(beads_dir(&tmp).join("wisps.jsonl"), "not json\n").unwrap();
    gt().arg("--beads-dir")
        .arg(beads_dir(&tmp))
        .args(["-q", "ready"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hq-special"))
        .stderr(predicate::str::contains("ignoring unreadable wisp index"))
        .stderr(predicate::str::contains("readiness pipeline finished").not());
}

#[test]
fn ready_fails_on_malformed_snapshot() {
    let tmp = init_project();
    fs::write(beads_dir(&tmp).join("issues.jsonl"), "{\"id\":\"gt-1\"}\n{oops\n").unwrap();
    gt().arg("--beads-dir")
        .arg(beads_dir(&tmp))
        .arg("ready")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn missing_beads_dir_is_reported_as_json() {
    let tmp = TempDir::new().unwrap();
    let output = gt()
        .arg("--beads-dir")
        .arg(tmp.path().join("missing"))
        .args(["ready", "--json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert!(
        err["error"].as_str().unwrap().contains("no beads directory found"),
        "{}",
        err
    );
}

// ---------------------------------------------------------------------------
// gt fields
// ---------------------------------------------------------------------------

#[test]
fn fields_show_json_reports_every_kind() {
    let tmp = init_project();
    let shown = run_json(&tmp, &["fields", "show", "gt-agent"]);
    assert_eq!(
        shown,
        serde_json::json!({
            "id": "gt-agent",
            "agent": {"role_type": "deacon", "agent_state": "working"},
            "attachment": null,
            "mr": null,
        })
    );
}

#[test]
fn fields_show_single_kind_as_table() {
    let tmp = init_project();
    gt().arg("--beads-dir")
        .arg(beads_dir(&tmp))
        .args(["fields", "show", "gt-mr1", "--kind", "mr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mr fields:"))
        .stdout(predicate::str::contains("branch  polecat/nux/gt-456"))
        .stdout(predicate::str::contains("target  main"));
}

#[test]
fn fields_show_without_fields() {
    let tmp = init_project();
    gt().arg("--beads-dir")
        .arg(beads_dir(&tmp))
        .args(["fields", "show", "gt-456"])
        .assert()
        .success()
        .stdout("gt-456: no description fields\n");
}

#[test]
fn fields_show_unknown_issue_fails() {
    let tmp = init_project();
    gt().arg("--beads-dir")
        .arg(beads_dir(&tmp))
        .args(["fields", "show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("issue 'nope' not found"));
}

#[test]
fn fields_set_merges_overrides_and_keeps_prose() {
    let tmp = init_project();
    gt().arg("--beads-dir")
        .arg(beads_dir(&tmp))
        .args(["fields", "set", "gt-mr1", "--kind", "mr", "worker=alice"])
        .assert()
        .success()
        .stdout("branch: polecat/nux/gt-456\ntarget: main\nworker: alice\n\nFree prose here.\n");
}

#[test]
fn fields_set_clear_and_empty_value() {
    let tmp = init_project();
    gt().arg("--beads-dir")
        .arg(beads_dir(&tmp))
        .args(["fields", "set", "gt-mr1", "--kind", "mr", "--clear", "merge-commit=abc123"])
        .assert()
        .success()
        .stdout("merge_commit: abc123\n\nFree prose here.\n");

    gt().arg("--beads-dir")
        .arg(beads_dir(&tmp))
        .args(["fields", "set", "gt-mr1", "--kind", "mr", "branch=", "target="])
        .assert()
        .success()
        .stdout("Free prose here.\n");
}

#[test]
fn fields_set_json_output() {
    let tmp = init_project();
    let set = run_json(
        &tmp,
        &["fields", "set", "gt-agent", "--kind", "agent", "hook-bead=gt-456"],
    );
    assert_eq!(set["kind"], "agent");
    assert_eq!(set["fields"]["hook_bead"], "gt-456");
    assert_eq!(
        set["description"],
        "role_type: deacon\nagent_state: working\nhook_bead: gt-456"
    );
}

#[test]
fn fields_set_rejects_unknown_key() {
    let tmp = init_project();
    gt().arg("--beads-dir")
        .arg(beads_dir(&tmp))
        .args(["fields", "set", "gt-mr1", "--kind", "mr", "role_type=deacon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown mr field 'role_type'"));
}

#[test]
fn fields_set_rejects_multiline_value() {
    let tmp = init_project();
    gt().arg("--beads-dir")
        .arg(beads_dir(&tmp))
        .args([
            "fields",
            "set",
            "gt-mr1",
            "--kind",
            "mr",
            "branch=foo\nworker: mallory\nrole_type: mayor",
        ])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("must be a single line"));
}

#[test]
fn fields_set_does_not_write_the_store() {
    let tmp = init_project();
    gt().arg("--beads-dir")
        .arg(beads_dir(&tmp))
        .args(["fields", "set", "gt-mr1", "--kind", "mr", "worker=alice"])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(beads_dir(&tmp).join("issues.jsonl")).unwrap(),
        SNAPSHOT
    );
}

// ---------------------------------------------------------------------------
// gt formulas
// ---------------------------------------------------------------------------

#[test]
fn formulas_lists_sorted_names() {
    let tmp = init_project();
    fs::write(
        beads_dir(&tmp).join("formulas").join("shiny.formula.toml"),
        "",
    )
    .unwrap();
    fs::write(
        beads_dir(&tmp).join("formulas").join("code-review.formula.toml"),
        "",
    )
    .unwrap();

    gt().arg("--beads-dir")
        .arg(beads_dir(&tmp))
        .arg("formulas")
        .assert()
        .success()
        .stdout("code-review\nmol-deacon-patrol\nshiny\n");

    assert_eq!(
        run_json(&tmp, &["formulas"]),
        serde_json::json!(["code-review", "mol-deacon-patrol", "shiny"])
    );
}

#[test]
fn formulas_without_directory_is_empty() {
    let tmp = init_project();
    fs::remove_dir_all(beads_dir(&tmp).join("formulas")).unwrap();
    assert_eq!(run_json(&tmp, &["formulas"]), serde_json::json!([]));
    gt().arg("--beads-dir")
        .arg(beads_dir(&tmp))
        .arg("formulas")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("No formulas installed"));
}

#[test]
fn no_subcommand_prints_help() {
    gt().assert()
        .success()
        .stdout(predicate::str::contains("Usage: gt"));
}
