// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Open scanner issue checks.

use crate::check::{Category, Check, CheckContext, CheckResult, Params, Severity};
use crate::phase::PhaseId;
use crate::project::{IssueQuery, Priority};

/// Fails while open, non-false-positive issues of one priority remain.
pub struct IssueCountCheck {
    name: &'static str,
    description: &'static str,
    priority: Priority,
    severity: Severity,
    phases: &'static [PhaseId],
}

/// Open Critical issues block a release.
pub const CRITICAL_ISSUES: IssueCountCheck = IssueCountCheck {
    name: "Critical Issues",
    description: "Checks for open Critical priority issues",
    priority: Priority::Critical,
    severity: Severity::Error,
    phases: &[PhaseId::TESTING, PhaseId::FINAL],
};

pub const HIGH_ISSUES: IssueCountCheck = IssueCountCheck {
    name: "High Issues",
    description: "Checks for open High priority issues",
    priority: Priority::High,
    severity: Severity::Warning,
    phases: &[PhaseId::FINAL],
};

impl Check for IssueCountCheck {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn category(&self) -> Category {
        Category::Issues
    }

    fn default_phases(&self) -> &[PhaseId] {
        self.phases
    }

    fn run(&self, ctx: &CheckContext, _params: &Params) -> anyhow::Result<CheckResult> {
        let (Some(project_id), Some(store)) = (ctx.project.id.as_deref(), ctx.issues) else {
            return Ok(CheckResult::not_applicable(
                self.name,
                "No DB/project (skipped)",
            ));
        };

        let count = store
            .issues(project_id, &IssueQuery::open(self.priority))?
            .len();

        Ok(if count == 0 {
            CheckResult::passed(
                self.name,
                self.severity,
                format!("No {} issues", self.priority),
            )
        } else {
            CheckResult::failed(
                self.name,
                self.severity,
                format!("{count} {} issue(s) found", self.priority),
            )
        })
    }
}

#[cfg(test)]
#[path = "issues_tests.rs"]
mod tests;
