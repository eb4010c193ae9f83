// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! LICENSE file check.

use serde_json::json;

use super::scan::first_existing;
use crate::check::{
    Category, Check, CheckContext, CheckResult, Params, ParamsExt, Severity, params,
};
use crate::phase::PhaseId;

/// Requires a license file at the project root.
pub struct LicenseCheck;

impl Check for LicenseCheck {
    fn name(&self) -> &str {
        "LICENSE"
    }

    fn description(&self) -> &str {
        "Checks for LICENSE, LICENSE.md, LICENSE.txt"
    }

    fn category(&self) -> Category {
        Category::Files
    }

    fn default_phases(&self) -> &[PhaseId] {
        // Not required in Initial
        &[PhaseId::DEVELOPMENT, PhaseId::TESTING, PhaseId::FINAL]
    }

    fn default_params(&self) -> Params {
        params([(
            "allowed_names",
            json!(["LICENSE", "LICENSE.md", "LICENSE.txt", "LIZENZ", "MIT-LICENSE"]),
        )])
    }

    fn run(&self, ctx: &CheckContext, params: &Params) -> anyhow::Result<CheckResult> {
        let names = params.get_list("allowed_names")?;

        Ok(match first_existing(ctx.root, &names) {
            Some(found) => CheckResult::passed(self.name(), Severity::Error, format!("{found} found")),
            None => CheckResult::failed(self.name(), Severity::Error, "No LICENSE file found"),
        })
    }
}

#[cfg(test)]
#[path = "license_tests.rs"]
mod tests;
