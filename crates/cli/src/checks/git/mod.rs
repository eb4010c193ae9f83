// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Git checks: clean working tree and required `.gitignore` patterns.

use serde_json::json;

use super::scan::read_lossy;
use crate::check::{
    Category, Check, CheckContext, CheckResult, Params, ParamsExt, Severity, params,
};
use crate::git::uncommitted_changes;
use crate::phase::PhaseId;

/// Setting holding the fallback pattern list as a JSON array.
pub const PATTERNS_SETTING: &str = "gitignore_required_patterns";

/// Requires a clean working tree.
pub struct GitStatusCheck;

impl Check for GitStatusCheck {
    fn name(&self) -> &str {
        "Git Status"
    }

    fn description(&self) -> &str {
        "Checks for uncommitted changes"
    }

    fn category(&self) -> Category {
        Category::Git
    }

    fn default_phases(&self) -> &[PhaseId] {
        &[PhaseId::FINAL]
    }

    fn run(&self, ctx: &CheckContext, _params: &Params) -> anyhow::Result<CheckResult> {
        let changes = match uncommitted_changes(ctx.root) {
            Ok(Some(changes)) => changes,
            Ok(None) => {
                return Ok(CheckResult::not_applicable(
                    self.name(),
                    "Not a Git repository",
                ));
            }
            Err(e) => return Ok(CheckResult::skipped(self.name(), format!("{e:#}"))),
        };

        if changes.is_empty() {
            return Ok(CheckResult::passed(
                self.name(),
                Severity::Warning,
                "Repository clean",
            ));
        }

        Ok(CheckResult::failed(
            self.name(),
            Severity::Warning,
            format!("{} uncommitted change(s)", changes.len()),
        )
        .with_detail("paths", json!(changes)))
    }
}

/// Requires a set of patterns to be present in `.gitignore`.
pub struct GitignorePatternsCheck;

impl GitignorePatternsCheck {
    /// Patterns from params, else from the settings store.
    fn required_patterns(ctx: &CheckContext, params: &Params) -> anyhow::Result<Vec<String>> {
        let configured = params.get_list("required_patterns")?;
        if !configured.is_empty() {
            return Ok(configured);
        }
        let Some(raw) = ctx.settings.setting(PATTERNS_SETTING) else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(patterns) => Ok(patterns),
            Err(e) => {
                tracing::warn!("ignoring malformed {PATTERNS_SETTING} setting: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Spellings of `pattern` that count as present.
    fn variants(pattern: &str) -> [String; 6] {
        [
            pattern.to_string(),
            pattern.trim_start_matches('/').to_string(),
            pattern.trim_end_matches('/').to_string(),
            pattern.trim_matches('/').to_string(),
            format!("{pattern}/"),
            format!("/{}", pattern.trim_start_matches('/')),
        ]
    }
}

impl Check for GitignorePatternsCheck {
    fn name(&self) -> &str {
        "Gitignore Patterns"
    }

    fn description(&self) -> &str {
        "Checks for required patterns in .gitignore"
    }

    fn category(&self) -> Category {
        Category::Git
    }

    fn default_phases(&self) -> &[PhaseId] {
        &[PhaseId::TESTING, PhaseId::FINAL]
    }

    fn default_params(&self) -> Params {
        params([("required_patterns", json!([]))])
    }

    fn run(&self, ctx: &CheckContext, params: &Params) -> anyhow::Result<CheckResult> {
        let required = Self::required_patterns(ctx, params)?;
        if required.is_empty() {
            return Ok(CheckResult::not_applicable(
                self.name(),
                "No patterns configured",
            ));
        }

        let path = ctx.root.join(".gitignore");
        if !path.exists() {
            return Ok(CheckResult::failed(
                self.name(),
                Severity::Warning,
                format!("No .gitignore ({} patterns missing)", required.len()),
            ));
        }
        let Some(content) = read_lossy(&path) else {
            return Ok(CheckResult::not_applicable(
                self.name(),
                "Could not read .gitignore",
            ));
        };

        let entries: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();

        let missing: Vec<&str> = required
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .filter(|p| {
                !Self::variants(p)
                    .iter()
                    .any(|v| entries.contains(&v.as_str()))
            })
            .collect();

        if !missing.is_empty() {
            return Ok(CheckResult::failed(
                self.name(),
                Severity::Warning,
                format!("Missing: {}", missing.join(", ")),
            )
            .with_detail("missing", json!(missing)));
        }

        Ok(CheckResult::passed(
            self.name(),
            Severity::Warning,
            format!("All {} patterns present", required.len()),
        ))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
