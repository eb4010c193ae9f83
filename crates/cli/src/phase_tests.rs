// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[test]
fn seed_matrix_covers_builtin_phases_only() {
    for phase in ALL_PHASES {
        assert!(seed_matrix(*phase).is_some(), "phase {phase}");
    }
    assert!(seed_matrix(PhaseId(9)).is_none());
}

#[test]
fn seed_matrix_gates_changelog_until_testing() {
    let initial = seed_matrix(PhaseId::INITIAL).unwrap();
    let testing = seed_matrix(PhaseId::TESTING).unwrap();
    let final_phase = seed_matrix(PhaseId::FINAL).unwrap();

    assert!(!initial.get("CHANGELOG").unwrap().enabled);
    assert_eq!(
        testing.get("CHANGELOG").unwrap(),
        &MatrixEntry::enabled(Severity::Warning)
    );
    assert_eq!(
        final_phase.get("CHANGELOG").unwrap(),
        &MatrixEntry::enabled(Severity::Error)
    );
}

#[test]
fn license_is_a_blocker_in_every_phase() {
    for phase in ALL_PHASES {
        let matrix = seed_matrix(*phase).unwrap();
        assert_eq!(
            matrix.get("LICENSE").unwrap(),
            &MatrixEntry::enabled(Severity::Error)
        );
    }
}

#[test]
fn seed_matrix_includes_repository_hygiene_checks() {
    let initial = seed_matrix(PhaseId::INITIAL).unwrap();
    let development = seed_matrix(PhaseId::DEVELOPMENT).unwrap();
    let testing = seed_matrix(PhaseId::TESTING).unwrap();
    let final_phase = seed_matrix(PhaseId::FINAL).unwrap();

    assert_eq!(
        initial.get("Gitignore Patterns").unwrap(),
        &MatrixEntry::enabled(Severity::Warning)
    );
    assert_eq!(
        final_phase.get("Gitignore Patterns").unwrap(),
        &MatrixEntry::enabled(Severity::Error)
    );

    assert!(!initial.get("Gradio Share").unwrap().enabled);
    assert_eq!(
        development.get("Gradio Share").unwrap(),
        &MatrixEntry::enabled(Severity::Warning)
    );
    assert_eq!(
        testing.get("Gradio Share").unwrap(),
        &MatrixEntry::enabled(Severity::Error)
    );
}

#[test]
fn matrix_entry_deserializes_with_defaults() {
    let entry: MatrixEntry = toml::from_str("severity = \"warning\"\n").unwrap();
    assert!(entry.enabled);
    assert_eq!(entry.severity, Severity::Warning);
    assert!(entry.params.is_empty());
}

#[test]
fn matrix_entry_rejects_unknown_fields() {
    let result: Result<MatrixEntry, _> = toml::from_str("severity = \"error\"\nenable = true\n");
    assert!(result.is_err());
}

#[test]
fn matrix_entry_carries_params() {
    let entry: MatrixEntry =
        toml::from_str("severity = \"error\"\nparams = { timeout = 5 }\n").unwrap();
    assert_eq!(entry.params.get("timeout"), Some(&serde_json::json!(5)));
}

#[test]
fn builtin_phase_display_names() {
    let names: Vec<_> = builtin_phases()
        .into_iter()
        .map(|p| p.display_name)
        .collect();
    assert_eq!(names, ["Initial", "Development", "Testing", "Final"]);
}
