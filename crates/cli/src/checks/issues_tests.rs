// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::project::{Issue, IssueStatus};
use crate::test_utils::Fixture;

fn issue(project: &str, priority: Priority, status: IssueStatus, fp: bool) -> Issue {
    Issue {
        project_id: project.to_string(),
        priority,
        status,
        is_false_positive: fp,
        title: "finding".to_string(),
    }
}

fn fixture_with(issues: Vec<Issue>) -> Fixture {
    let mut fx = Fixture::new(&[]);
    fx.store = std::mem::take(&mut fx.store).with_issues(issues);
    fx
}

#[test]
fn critical_issues_block() {
    let fx = fixture_with(vec![
        issue("p1", Priority::Critical, IssueStatus::Open, false),
        issue("p1", Priority::Critical, IssueStatus::Open, false),
        issue("p1", Priority::Critical, IssueStatus::Open, false),
    ]);

    let result = fx.run(CRITICAL_ISSUES);
    assert!(!result.passed);
    assert_eq!(result.severity, Severity::Error);
    assert_eq!(result.message, "3 Critical issue(s) found");

    let high = fx.run(HIGH_ISSUES);
    assert!(high.passed);
    assert_eq!(high.severity, Severity::Warning);
    assert_eq!(high.message, "No High issues");
}

#[test]
fn only_open_true_positives_of_this_project_count() {
    let fx = fixture_with(vec![
        issue("p1", Priority::High, IssueStatus::Open, false),
        issue("p1", Priority::High, IssueStatus::Fixed, false),
        issue("p1", Priority::High, IssueStatus::Ignored, false),
        issue("p1", Priority::High, IssueStatus::Open, true),
        issue("p2", Priority::High, IssueStatus::Open, false),
        issue("p1", Priority::Medium, IssueStatus::Open, false),
    ]);

    let result = fx.run(HIGH_ISSUES);
    assert!(!result.passed);
    assert_eq!(result.message, "1 High issue(s) found");
}

#[test]
fn no_issues_passes_as_blocker_satisfied() {
    let fx = fixture_with(vec![]);
    let result = fx.run(CRITICAL_ISSUES);
    assert!(result.passed);
    assert_eq!(result.severity, Severity::Error);
    assert_eq!(result.message, "No Critical issues");
}

#[test]
fn skipped_without_store() {
    let mut fx = fixture_with(vec![issue("p1", Priority::Critical, IssueStatus::Open, false)]);
    fx.with_issues = false;

    let result = fx.run(CRITICAL_ISSUES);
    assert!(result.passed);
    assert_eq!(result.severity, Severity::Info);
    assert_eq!(result.message, "No DB/project (skipped)");
}

#[test]
fn skipped_without_project_id() {
    let mut fx = fixture_with(vec![]);
    fx.project.id = None;
    assert_eq!(fx.run(HIGH_ISSUES).severity, Severity::Info);
}
