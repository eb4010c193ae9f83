// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specifications for the shipcheck CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

use prelude::*;

/// Only the named checks run in phase 1; everything else has no entry.
fn only_in_phase_one(checks: &[(&str, &str)]) -> String {
    let mut config = String::from("[project]\nphase = 1\n[runner]\nfallback = \"skip\"\n");
    for (name, severity) in checks {
        config.push_str(&format!("[matrix.1.\"{name}\"]\nseverity = \"{severity}\"\n"));
    }
    config
}

// =============================================================================
// COMMANDS
// =============================================================================

#[test]
fn bare_invocation_shows_help() {
    shipcheck_cmd()
        .assert()
        .success()
        .stdout(predicates::str::contains("Usage:"));
}

#[test]
fn version_exits_successfully() {
    shipcheck_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::contains("shipcheck"));
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    shipcheck_cmd().arg("deploy").assert().code(2);
}

// =============================================================================
// CHECK
// =============================================================================

#[test]
fn missing_license_in_final_phase_blocks_release() {
    let project = Project::empty();
    project.config("[project]\nphase = 4\n");
    project.file("README.md", &"A readme that is long enough to pass. ".repeat(3));

    let run = exits(run_in(&project, &["check", "-o", "json"]), 1);
    let report = run.json();
    assert_eq!(report["phase"], 4);
    assert_eq!(report["ready"], false);

    let license = result(&report, "LICENSE");
    assert_eq!(license["passed"], false);
    assert_eq!(license["severity"], "error");
    assert_eq!(license["message"], "No LICENSE file found");
}

#[test]
fn missing_license_is_shown_in_text_output() {
    let project = Project::empty();
    project.config(&only_in_phase_one(&[("LICENSE", "error")]));

    exits(run_in(&project, &["check", "--no-color"]), 1)
        .stdout_has("Phase 1 (Initial)")
        .stdout_has("FAIL  LICENSE [error]: No LICENSE file found")
        .stdout_has("0/1 check passed: NOT READY (1 blocker)");
}

#[test]
fn present_license_passes() {
    let project = Project::empty();
    project.config(&only_in_phase_one(&[("LICENSE", "error")]));
    project.file("LICENSE", "MIT");

    exits(run_in(&project, &["check"]), 0).stdout_has("READY");
}

#[test]
fn missing_linter_is_skipped_not_failed() {
    let project = Project::empty();
    project.config(&only_in_phase_one(&[("Ruff", "error")]));
    project.file("src/app.py", "print('hi')\n");
    let empty_path = tempfile::tempdir().unwrap();

    let mut cmd = run_in(&project, &["check", "-o", "json"]);
    cmd.env("PATH", empty_path.path());
    let report = exits(cmd, 0).json();

    let ruff = result(&report, "Ruff");
    assert_eq!(ruff["passed"], true);
    assert_eq!(ruff["severity"], "info");
    assert_eq!(ruff["message"], "Skipped (ruff not available)");
    assert_eq!(report["ready"], true);
}

#[test]
fn open_critical_issues_block_release() {
    let project = Project::empty();
    project.config(
        "[project]\nid = \"p1\"\nphase = 1\nissues = \"issues.json\"\n\
         [runner]\nfallback = \"skip\"\n\
         [matrix.1.\"Critical Issues\"]\nseverity = \"error\"\n\
         [matrix.1.\"High Issues\"]\nseverity = \"warning\"\n",
    );
    project.file(
        "issues.json",
        r#"[
            {"project_id": "p1", "priority": "Critical"},
            {"project_id": "p1", "priority": "Critical"},
            {"project_id": "p1", "priority": "Critical"},
            {"project_id": "p1", "priority": "Critical", "status": "fixed"},
            {"project_id": "p1", "priority": "High", "is_false_positive": true},
            {"project_id": "p2", "priority": "High"}
        ]"#,
    );

    let report = exits(run_in(&project, &["check", "-o", "json"]), 1).json();
    assert_eq!(check_names(&report), ["Critical Issues", "High Issues"]);

    let critical = result(&report, "Critical Issues");
    assert_eq!(critical["passed"], false);
    assert_eq!(critical["message"], "3 Critical issue(s) found");

    let high = result(&report, "High Issues");
    assert_eq!(high["passed"], true);
    assert_eq!(high["message"], "No High issues");
}

#[test]
fn empty_phase_runs_nothing() {
    let project = Project::empty();
    project.config("[project]\nphase = 1\n[runner]\nfallback = \"skip\"\n[matrix.1]\n");

    let report = exits(run_in(&project, &["check", "-o", "json"]), 0).json();
    assert_eq!(report["total"], 0);
    assert_eq!(report["ready"], true);
}

#[test]
fn results_are_ordered_by_severity_then_name() {
    let project = Project::empty();
    project.config(&only_in_phase_one(&[
        ("README", "warning"),
        ("LICENSE", "error"),
        ("CHANGELOG", "warning"),
    ]));

    let report = exits(run_in(&project, &["check", "-o", "json"]), 1).json();
    assert_eq!(check_names(&report), ["LICENSE", "CHANGELOG", "README"]);
}

#[test]
fn phase_flag_overrides_project_phase() {
    let project = Project::empty();
    project.config("[project]\nphase = 1\n");

    let report = exits(run_in(&project, &["check", "--phase", "2", "-o", "json"]), 1).json();
    assert_eq!(report["phase"], 2);
}

#[test]
fn unknown_phase_is_an_argument_error() {
    let project = Project::empty();
    exits(run_in(&project, &["check", "--phase", "9"]), 2)
        .stderr_has("shipcheck: argument error: unknown phase 9");
}

#[test]
fn check_accepts_project_path() {
    let project = Project::empty();
    project.config(&only_in_phase_one(&[("LICENSE", "error")]));
    project.file("LICENSE", "MIT");

    let mut cmd = shipcheck_cmd();
    cmd.args(["check", "-o", "json"]).arg(project.path());
    let report = exits(cmd, 0).json();
    assert_eq!(check_names(&report), ["LICENSE"]);
}

#[cfg(unix)]
#[test]
fn manifest_checks_run_alongside_builtins() {
    let project = Project::empty();
    project.config(
        "[project]\nphase = 1\n[registry]\nmanifest = \"checks.toml\"\n\
         [runner]\nfallback = \"skip\"\n\
         [matrix.1.\"Docs Build\"]\nseverity = \"error\"\n",
    );
    project.file(
        "checks.toml",
        "[[check]]\nname = \"Docs Build\"\ncommand = [\"sh\", \"-c\", \"echo docs missing; exit 1\"]\n",
    );

    let report = exits(run_in(&project, &["check", "-o", "json"]), 1).json();
    let docs = result(&report, "Docs Build");
    assert_eq!(docs["passed"], false);
    assert_eq!(docs["severity"], "error");
    assert_eq!(docs["message"], "exit status 1: docs missing");
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn unsupported_config_version_exits_2() {
    let project = Project::empty();
    project.config("version = 2\n");

    exits(run_in(&project, &["check"]), 2).stderr_has("unsupported config version 2");
}

#[test]
fn invalid_matrix_severity_exits_2() {
    let project = Project::empty();
    project.config("[matrix.1.LICENSE]\nseverity = \"fatal\"\n");

    exits(run_in(&project, &["check"]), 2).stderr_has("shipcheck: config error");
}

#[test]
fn unknown_top_level_key_warns_and_continues() {
    let project = Project::empty();
    project.config(&format!(
        "colour = \"blue\"\n{}",
        only_in_phase_one(&[("LICENSE", "error")])
    ));
    project.file("LICENSE", "MIT");

    exits(run_in(&project, &["check"]), 0).stderr_has("unrecognized field `colour`");
}

#[test]
fn explicit_config_flag_is_used() {
    let project = Project::empty();
    project.file("other.toml", &format!("version = 1\n{}", only_in_phase_one(&[("LICENSE", "error")])));

    let report = exits(
        run_in(&project, &["-C", "other.toml", "check", "-o", "json"]),
        1,
    )
    .json();
    assert_eq!(check_names(&report), ["LICENSE"]);
}

#[test]
fn missing_explicit_config_exits_2() {
    let project = Project::empty();
    exits(run_in(&project, &["-C", "nope.toml", "check"]), 2)
        .stderr_has("config file not found");
}

// =============================================================================
// OUTPUT
// =============================================================================

#[test]
fn color_flag_forces_ansi_codes() {
    let project = Project::empty();
    project.config(&only_in_phase_one(&[("LICENSE", "error")]));

    exits(run_in(&project, &["check", "--color"]), 1).stdout_has("\x1b[");
}

#[test]
fn no_color_env_disables_ansi_codes() {
    let project = Project::empty();
    project.config(&only_in_phase_one(&[("LICENSE", "error")]));

    let mut cmd = run_in(&project, &["check"]);
    cmd.env("NO_COLOR", "1");
    exits(cmd, 1).stdout_lacks("\x1b[");
}

#[test]
fn json_report_has_rfc3339_timestamp() {
    let project = Project::empty();
    project.config(&only_in_phase_one(&[("LICENSE", "error")]));

    let report = exits(run_in(&project, &["check", "-o", "json"]), 1).json();
    let timestamp = report["timestamp"].as_str().unwrap();
    assert!(timestamp.contains('T'));
    assert!(timestamp.ends_with('Z'));
}

// =============================================================================
// LIST
// =============================================================================

#[test]
fn list_json_describes_every_builtin() {
    let project = Project::empty();
    let run = exits(run_in(&project, &["list", "-o", "json"]), 0);
    let items = run.json();
    let items = items.as_array().unwrap();

    assert_eq!(items.len(), 18);
    let license = items.iter().find(|i| i["name"] == "LICENSE").unwrap();
    assert_eq!(license["category"], "files");
    assert_eq!(license["default_phases"], serde_json::json!([2, 3, 4]));
}

#[test]
fn list_filters_by_category() {
    let project = Project::empty();
    exits(run_in(&project, &["list", "--category", "git"]), 0)
        .stdout_has("Git Status")
        .stdout_has("Gitignore Patterns")
        .stdout_lacks("LICENSE");
}

// =============================================================================
// MATRIX
// =============================================================================

#[test]
fn matrix_explains_each_decision() {
    let project = Project::empty();
    let run = exits(run_in(&project, &["matrix", "--phase", "1"]), 0)
        .stdout_has("Phase 1 (Initial)");
    let stdout = run.stdout();

    let line = |name: &str| {
        stdout
            .lines()
            .find(|l| l.split_whitespace().nth(1) == Some(name))
            .unwrap_or_else(|| panic!("no line for {name}:\n{stdout}"))
            .to_string()
    };
    assert!(line("LICENSE").contains("matrix (error)"));
    assert!(line("CHANGELOG").contains("disabled in matrix"));
    assert!(line("LICENSE").starts_with("run"));
    assert!(line("CHANGELOG").starts_with("skip"));
}
