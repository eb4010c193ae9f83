// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test suite and coverage checks, run through the project's own pytest.
//!
//! Only `.venv/bin/pytest` is used: a system pytest would run against the
//! wrong interpreter and dependencies.

use std::path::Path;
use std::process::Command;
use std::time::Duration;

use regex::Regex;
use serde_json::json;

use super::scan::python_files;
use crate::check::{
    Category, Check, CheckContext, CheckResult, Params, ParamsExt, Severity, params,
};
use crate::phase::PhaseId;
use crate::process::{ToolOutcome, run_with_timeout, venv_bin};

const PYTEST_MISSING: &str = "pytest not found (skipped)";

fn has_tests(root: &Path) -> bool {
    if ["tests", "test"].iter().any(|d| root.join(d).exists()) {
        return true;
    }
    let skip = [".venv".to_string(), "venv".to_string()];
    python_files(root, &skip, usize::MAX).iter().any(|path| {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("test_"))
    })
}

/// First capture of `pattern` in `text`, parsed as a number.
fn capture_number(pattern: &str, text: &str) -> anyhow::Result<Option<u64>> {
    let re = Regex::new(pattern)?;
    Ok(re
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok()))
}

/// Runs the test suite; a failing or hanging suite blocks release.
pub struct TestsCheck;

impl Check for TestsCheck {
    fn name(&self) -> &str {
        "Tests"
    }

    fn description(&self) -> &str {
        "Runs pytest and checks results"
    }

    fn category(&self) -> Category {
        Category::Quality
    }

    fn default_phases(&self) -> &[PhaseId] {
        &[PhaseId::TESTING, PhaseId::FINAL]
    }

    fn default_params(&self) -> Params {
        params([("timeout", json!(120))])
    }

    fn run(&self, ctx: &CheckContext, params: &Params) -> anyhow::Result<CheckResult> {
        let secs = params.get_u64("timeout")?;

        if !has_tests(ctx.root) {
            return Ok(CheckResult::failed(
                self.name(),
                Severity::Warning,
                "No tests found",
            ));
        }

        let pytest = venv_bin(ctx.root, "pytest");
        if !pytest.exists() {
            return Ok(CheckResult::not_applicable(self.name(), PYTEST_MISSING));
        }

        let mut cmd = Command::new(pytest);
        cmd.args(["-q", "--tb=no"]).current_dir(ctx.root);

        let output = match run_with_timeout(cmd, Duration::from_secs(secs))? {
            ToolOutcome::Completed(output) => output,
            ToolOutcome::NotFound => {
                return Ok(CheckResult::not_applicable(self.name(), PYTEST_MISSING));
            }
            ToolOutcome::TimedOut(_) => {
                return Ok(CheckResult::failed(
                    self.name(),
                    Severity::Error,
                    format!("Timeout (>{secs}s)"),
                ));
            }
        };

        let text = output.combined();
        let passed = capture_number(r"(\d+) passed", &text)?.unwrap_or(0);
        let failed = capture_number(r"(\d+) failed", &text)?.unwrap_or(0);

        Ok(if output.success() {
            CheckResult::passed(
                self.name(),
                Severity::Error,
                format!("{passed} tests passed"),
            )
        } else {
            CheckResult::failed(
                self.name(),
                Severity::Error,
                format!("{failed} failed, {passed} passed"),
            )
        }
        .with_detail("passed", json!(passed))
        .with_detail("failed", json!(failed)))
    }
}

/// Measures line coverage with `pytest --cov`.
pub struct CoverageCheck;

impl CoverageCheck {
    /// Package to measure: first non-private directory under `src/`.
    fn cov_target(root: &Path) -> String {
        let Ok(entries) = std::fs::read_dir(root.join("src")) else {
            return ".".to_string();
        };
        let mut packages: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| !name.starts_with('_'))
            .collect();
        packages.sort();
        packages
            .into_iter()
            .next()
            .unwrap_or_else(|| ".".to_string())
    }

    fn parse_coverage(text: &str) -> anyhow::Result<Option<u64>> {
        match capture_number(r"TOTAL\s+\d+\s+\d+\s+(\d+)%", text)? {
            Some(pct) => Ok(Some(pct)),
            None => capture_number(r"(\d+)%", text),
        }
    }
}

impl Check for CoverageCheck {
    fn name(&self) -> &str {
        "Coverage"
    }

    fn description(&self) -> &str {
        "Runs pytest --cov and checks percentage"
    }

    fn category(&self) -> Category {
        Category::Quality
    }

    fn default_phases(&self) -> &[PhaseId] {
        &[PhaseId::FINAL]
    }

    fn default_params(&self) -> Params {
        params([
            ("timeout", json!(180)),
            ("min_coverage", json!(60)),
            ("good_coverage", json!(80)),
        ])
    }

    fn run(&self, ctx: &CheckContext, params: &Params) -> anyhow::Result<CheckResult> {
        let secs = params.get_u64("timeout")?;
        let min = params.get_u64("min_coverage")?;
        let good = params.get_u64("good_coverage")?;

        let pytest = venv_bin(ctx.root, "pytest");
        if !pytest.exists() {
            return Ok(CheckResult::not_applicable(self.name(), PYTEST_MISSING));
        }

        let mut cmd = Command::new(pytest);
        cmd.arg(format!("--cov={}", Self::cov_target(ctx.root)))
            .args(["-q", "--tb=no", "--no-header"])
            .current_dir(ctx.root);

        // Coverage is advisory: a pytest that cannot be spawned is a skip.
        let output = match run_with_timeout(cmd, Duration::from_secs(secs)) {
            Ok(ToolOutcome::Completed(output)) => output,
            Ok(ToolOutcome::NotFound) => {
                return Ok(CheckResult::not_applicable(self.name(), PYTEST_MISSING));
            }
            Ok(ToolOutcome::TimedOut(_)) => {
                return Ok(CheckResult::not_applicable(
                    self.name(),
                    format!("Timeout (>{secs}s)"),
                ));
            }
            Err(e) => return Ok(CheckResult::skipped(self.name(), e)),
        };

        let Some(pct) = Self::parse_coverage(&output.combined())? else {
            return Ok(CheckResult::not_applicable(
                self.name(),
                "Coverage not determinable",
            ));
        };

        let result = if pct >= good {
            CheckResult::passed(self.name(), Severity::Info, format!("Coverage {pct}% (good)"))
        } else if pct >= min {
            CheckResult::passed(
                self.name(),
                Severity::Warning,
                format!("Coverage {pct}% (acceptable)"),
            )
        } else {
            CheckResult::failed(
                self.name(),
                Severity::Error,
                format!("Coverage {pct}% (too low)"),
            )
        };
        Ok(result.with_detail("coverage", json!(pct)))
    }
}

#[cfg(test)]
#[path = "pytest_tests.rs"]
mod tests;
