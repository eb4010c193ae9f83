// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use crate::check::Severity;
use crate::project::{IssueQuery, Priority};
use crate::store::{IssueStore, SettingsStore};

fn path() -> PathBuf {
    PathBuf::from("shipcheck.toml")
}

#[test]
fn parses_minimal_config() {
    let config = parse("version = 1\n", &path()).unwrap();
    assert_eq!(config.version, 1);
    assert_eq!(config.runner_config(), RunnerConfig::default());
    assert!(config.matrix.is_empty());
}

#[test]
fn rejects_missing_version() {
    let err = parse("", &path()).unwrap_err();
    assert!(err.to_string().contains("missing required field: version"));
}

#[test]
fn rejects_unsupported_version() {
    let err = parse("version = 2\n", &path()).unwrap_err();
    assert!(err.to_string().contains("unsupported config version 2"));
    assert!(parse("version = 0\n", &path()).is_err());
}

#[test]
fn unknown_top_level_keys_are_ignored() {
    let config = parse("version = 1\n[telemetry]\nenabled = true\n", &path()).unwrap();
    assert_eq!(config.version, 1);
}

#[test]
fn unknown_section_keys_are_errors() {
    let err = parse("version = 1\n[runner]\nthreads = 4\n", &path()).unwrap_err();
    assert!(err.to_string().contains("threads"));
}

#[test]
fn parses_runner_section() {
    let content = r#"
version = 1

[runner]
workers = 2
default_phase = 3
fallback = "skip"
"#;
    let runner = parse(content, &path()).unwrap().runner_config();
    assert_eq!(runner.workers, 2);
    assert_eq!(runner.default_phase, PhaseId::TESTING);
    assert_eq!(runner.fallback, FallbackPolicy::Skip);
}

#[test]
fn rejects_zero_workers() {
    let err = parse("version = 1\n[runner]\nworkers = 0\n", &path()).unwrap_err();
    assert!(err.to_string().contains("runner.workers"));
}

#[test]
fn rejects_unknown_fallback() {
    assert!(parse("version = 1\n[runner]\nfallback = \"maybe\"\n", &path()).is_err());
}

#[test]
fn parses_matrix_into_store() {
    let content = r#"
version = 1

[matrix.4."LICENSE"]
severity = "error"

[matrix.4."Ruff"]
enabled = false
severity = "warning"

[matrix.4."Coverage"]
severity = "warning"
params = { min_coverage = 40 }
"#;
    let config = parse(content, &path()).unwrap();
    let store = config.store(Path::new(".")).unwrap();
    let matrix = store.phase_matrix(PhaseId::FINAL).unwrap().unwrap();

    assert_eq!(matrix.len(), 3);
    assert!(matrix.get("LICENSE").unwrap().enabled);
    assert!(!matrix.get("Ruff").unwrap().enabled);
    let coverage = matrix.get("Coverage").unwrap();
    assert_eq!(coverage.severity, Severity::Warning);
    assert_eq!(coverage.params["min_coverage"], serde_json::json!(40));

    // Phases without configuration fall back to the seed matrix.
    assert!(store.phase_matrix(PhaseId::TESTING).unwrap().unwrap().get("Tests").is_some());
}

#[test]
fn rejects_non_numeric_matrix_key() {
    let err = parse("version = 1\n[matrix.final.\"LICENSE\"]\nseverity = \"error\"\n", &path())
        .unwrap_err();
    assert!(err.to_string().contains("not a phase id"));
}

#[test]
fn rejects_matrix_entry_without_severity() {
    assert!(parse("version = 1\n[matrix.1.\"LICENSE\"]\nenabled = true\n", &path()).is_err());
}

#[test]
fn settings_and_phases_reach_store() {
    let content = r#"
version = 1

[settings]
gitignore_required_patterns = [".env", ".venv"]
owner = "team"

[[phases]]
id = 3
name = "testing"
display_name = "Beta"
"#;
    let store = parse(content, &path()).unwrap().store(Path::new(".")).unwrap();
    assert_eq!(
        store.setting("gitignore_required_patterns").unwrap(),
        r#"[".env",".venv"]"#
    );
    assert_eq!(store.setting("owner").unwrap(), "team");
    assert_eq!(store.phase(PhaseId::TESTING).unwrap().display_name, "Beta");
    assert_eq!(store.phase(PhaseId::FINAL).unwrap().display_name, "Final");
}

#[test]
fn project_section_describes_project() {
    let content = r#"
version = 1

[project]
id = "acme-tool"
name = "Acme Tool"
phase = 2
"#;
    let project = parse(content, &path()).unwrap().project(Path::new("/work/acme"));
    assert_eq!(project.id.as_deref(), Some("acme-tool"));
    assert_eq!(project.name, "Acme Tool");
    assert_eq!(project.phase, Some(PhaseId::DEVELOPMENT));
    assert_eq!(project.path, Path::new("/work/acme"));
}

#[test]
fn project_name_defaults_to_directory() {
    let project = parse("version = 1\n", &path()).unwrap().project(Path::new("/work/acme"));
    assert_eq!(project.name, "acme");
    assert_eq!(project.phase, None);
}

#[test]
fn issues_export_is_loaded_relative_to_config() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("issues.json"),
        r#"[{"project_id": "p1", "priority": "Critical"}, {"project_id": "p1", "priority": "High", "status": "fixed"}]"#,
    )
    .unwrap();

    let config = parse("version = 1\n[project]\nissues = \"issues.json\"\n", &path()).unwrap();
    let store = config.store(dir.path()).unwrap();
    assert_eq!(
        store.issues("p1", &IssueQuery::open(Priority::Critical)).unwrap().len(),
        1
    );
    assert!(
        store
            .issues("p1", &IssueQuery::open(Priority::High))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn missing_issues_export_is_io_error() {
    let dir = tempdir().unwrap();
    let config = parse("version = 1\n[project]\nissues = \"nope.json\"\n", &path()).unwrap();
    assert!(matches!(config.store(dir.path()), Err(Error::Io { .. })));
}

#[test]
fn manifest_path_resolves_against_base() {
    let config = parse("version = 1\n[registry]\nmanifest = \"checks.toml\"\n", &path()).unwrap();
    assert_eq!(
        config.manifest_path(Path::new("/work/acme")),
        Some(PathBuf::from("/work/acme/checks.toml"))
    );
}

#[test]
fn load_reads_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join(CONFIG_FILE);
    fs::write(&config_path, "version = 1\n").unwrap();

    assert_eq!(load(&config_path).unwrap().version, 1);
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = load(&dir.path().join(CONFIG_FILE)).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
