// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CHANGELOG file check.

use serde_json::json;

use super::scan::first_existing;
use crate::check::{
    Category, Check, CheckContext, CheckResult, Params, ParamsExt, Severity, params,
};
use crate::phase::PhaseId;

pub struct ChangelogCheck;

impl Check for ChangelogCheck {
    fn name(&self) -> &str {
        "CHANGELOG"
    }

    fn description(&self) -> &str {
        "Checks for CHANGELOG.md or HISTORY.md"
    }

    fn category(&self) -> Category {
        Category::Files
    }

    fn default_phases(&self) -> &[PhaseId] {
        &[PhaseId::TESTING, PhaseId::FINAL]
    }

    fn default_params(&self) -> Params {
        params([(
            "allowed_names",
            json!(["CHANGELOG.md", "CHANGELOG.txt", "CHANGELOG", "HISTORY.md"]),
        )])
    }

    fn run(&self, ctx: &CheckContext, params: &Params) -> anyhow::Result<CheckResult> {
        let names = params.get_list("allowed_names")?;

        Ok(match first_existing(ctx.root, &names) {
            Some(found) => {
                CheckResult::passed(self.name(), Severity::Warning, format!("{found} found"))
            }
            None => CheckResult::failed(self.name(), Severity::Warning, "No CHANGELOG found"),
        })
    }
}

#[cfg(test)]
#[path = "changelog_tests.rs"]
mod tests;
