// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Static analysis checks backed by external Python tools.
//!
//! Both tools are looked up in the project's `.venv` first, then on `PATH`.
//! A missing tool, a failed probe or a timeout is a skip, not a failure.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use serde_json::json;

use crate::check::{
    Category, Check, CheckContext, CheckResult, Params, ParamsExt, Severity, params,
};
use crate::phase::PhaseId;
use crate::process::{ToolOutcome, resolve_tool, run_with_timeout};

const VERSION_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Directory handed to the linters: `src/` when present, else the root.
fn target_dir(root: &Path) -> PathBuf {
    let src = root.join("src");
    if src.exists() { src } else { root.to_path_buf() }
}

/// Cyclomatic complexity via `radon cc`.
pub struct RadonComplexityCheck;

impl RadonComplexityCheck {
    fn grade_lines<'a>(output: &'a str, grades: &[char]) -> Vec<&'a str> {
        output
            .lines()
            .filter(|line| grades.iter().any(|g| line.contains(&format!(" - {g} ("))))
            .collect()
    }
}

impl Check for RadonComplexityCheck {
    fn name(&self) -> &str {
        "Radon Complexity"
    }

    fn description(&self) -> &str {
        "Checks code complexity (A-B OK, C warning, D+ error)"
    }

    fn category(&self) -> Category {
        Category::Quality
    }

    fn default_phases(&self) -> &[PhaseId] {
        &[PhaseId::TESTING, PhaseId::FINAL]
    }

    fn default_params(&self) -> Params {
        params([
            ("timeout", json!(60)),
            ("exclude", json!(".venv,venv,node_modules,__pycache__")),
        ])
    }

    fn run(&self, ctx: &CheckContext, params: &Params) -> anyhow::Result<CheckResult> {
        let timeout = Duration::from_secs(params.get_u64("timeout")?);
        let exclude = params.get_str("exclude")?;

        let Some(radon) = resolve_tool(ctx.root, "radon") else {
            return Ok(CheckResult::skipped(self.name(), "radon not installed"));
        };

        let mut cmd = Command::new(radon);
        cmd.arg("cc")
            .arg(target_dir(ctx.root))
            .args(["-a", "-s", "--total-average", "--exclude", exclude])
            .current_dir(ctx.root);

        let output = match run_with_timeout(cmd, timeout) {
            Ok(ToolOutcome::Completed(output)) => output,
            Ok(ToolOutcome::NotFound) => {
                return Ok(CheckResult::skipped(self.name(), "radon not installed"));
            }
            Ok(ToolOutcome::TimedOut(_)) => {
                return Ok(CheckResult::skipped(self.name(), "timeout"));
            }
            Err(e) => return Ok(CheckResult::skipped(self.name(), e)),
        };

        if !output.success() {
            return Ok(CheckResult::skipped(self.name(), "radon not available"));
        }

        let errors = Self::grade_lines(&output.stdout, &['D', 'E', 'F']);
        if !errors.is_empty() {
            return Ok(CheckResult::failed(
                self.name(),
                Severity::Error,
                format!(
                    "{} function(s) with very high complexity (D+)",
                    errors.len()
                ),
            )
            .with_detail("functions", json!(errors)));
        }

        let warnings = Self::grade_lines(&output.stdout, &['C']);
        if !warnings.is_empty() {
            return Ok(CheckResult::passed(
                self.name(),
                Severity::Warning,
                format!("{} function(s) with complexity C", warnings.len()),
            ));
        }

        Ok(CheckResult::passed(
            self.name(),
            Severity::Info,
            "Complexity OK (A-B)",
        ))
    }
}

/// Lint via `ruff check`.
pub struct RuffCheck;

impl RuffCheck {
    /// True when `ruff --version` runs cleanly within the probe timeout.
    fn probe(ruff: &Path) -> bool {
        let mut cmd = Command::new(ruff);
        cmd.arg("--version");
        matches!(
            run_with_timeout(cmd, VERSION_PROBE_TIMEOUT),
            Ok(ToolOutcome::Completed(output)) if output.success()
        )
    }
}

impl Check for RuffCheck {
    fn name(&self) -> &str {
        "Ruff"
    }

    fn description(&self) -> &str {
        "Runs ruff linter"
    }

    fn category(&self) -> Category {
        Category::Quality
    }

    fn default_phases(&self) -> &[PhaseId] {
        &[PhaseId::TESTING, PhaseId::FINAL]
    }

    fn default_params(&self) -> Params {
        params([
            ("timeout", json!(30)),
            ("ignore", json!("E501")),
            (
                "exclude",
                json!(".venv,venv,node_modules,__pycache__,build,dist"),
            ),
        ])
    }

    fn run(&self, ctx: &CheckContext, params: &Params) -> anyhow::Result<CheckResult> {
        let timeout = Duration::from_secs(params.get_u64("timeout")?);
        let ignore = params.get_str("ignore")?;
        let exclude = params.get_str("exclude")?;

        let ruff = match resolve_tool(ctx.root, "ruff") {
            Some(ruff) if Self::probe(&ruff) => ruff,
            _ => return Ok(CheckResult::skipped(self.name(), "ruff not available")),
        };

        let mut cmd = Command::new(ruff);
        cmd.arg("check")
            .arg(target_dir(ctx.root))
            .args(["--quiet", "--ignore", ignore, "--exclude", exclude])
            .current_dir(ctx.root);

        let output = match run_with_timeout(cmd, timeout) {
            Ok(ToolOutcome::Completed(output)) => output,
            Ok(ToolOutcome::NotFound) => {
                return Ok(CheckResult::skipped(self.name(), "ruff not available"));
            }
            Ok(ToolOutcome::TimedOut(_)) => {
                return Ok(CheckResult::skipped(self.name(), "timeout"));
            }
            Err(e) => return Ok(CheckResult::skipped(self.name(), e)),
        };

        let findings = output.stdout.trim();
        let count = if findings.is_empty() {
            0
        } else {
            findings.lines().count()
        };

        Ok(if count == 0 {
            CheckResult::passed(self.name(), Severity::Warning, "No linting errors")
        } else {
            CheckResult::failed(
                self.name(),
                Severity::Warning,
                format!("{count} linting error(s)"),
            )
        })
    }
}

#[cfg(test)]
#[path = "quality_tests.rs"]
mod tests;
