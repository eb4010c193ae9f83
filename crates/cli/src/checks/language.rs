// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! English-only checks for source and packaging metadata.

use serde_json::json;

use super::readme::GERMAN_CHARS;
use super::scan::{contains_any_char, python_files, read_lossy, relative};
use crate::check::{
    Category, Check, CheckContext, CheckResult, Params, ParamsExt, Severity, params,
};
use crate::phase::PhaseId;

/// Flags Python files containing German characters.
pub struct CodeEnglishCheck;

impl Check for CodeEnglishCheck {
    fn name(&self) -> &str {
        "Code English"
    }

    fn description(&self) -> &str {
        "Checks Python code for German characters"
    }

    fn category(&self) -> Category {
        Category::Quality
    }

    fn default_phases(&self) -> &[PhaseId] {
        &[PhaseId::FINAL]
    }

    fn default_params(&self) -> Params {
        params([
            ("german_chars", json!(GERMAN_CHARS)),
            (
                "skip_dirs",
                json!([
                    "translations",
                    "locales",
                    "i18n",
                    "locale",
                    ".venv",
                    "venv",
                    "__pycache__"
                ]),
            ),
            ("max_files", json!(100)),
        ])
    }

    fn run(&self, ctx: &CheckContext, params: &Params) -> anyhow::Result<CheckResult> {
        let chars = params.get_str("german_chars")?;
        let skip_dirs = params.get_list("skip_dirs")?;
        let max_files = params.get_u64("max_files")? as usize;

        let offenders: Vec<String> = python_files(ctx.root, &skip_dirs, max_files)
            .iter()
            .filter(|path| read_lossy(path).is_some_and(|c| contains_any_char(&c, chars)))
            .map(|path| relative(ctx.root, path))
            .collect();

        if offenders.is_empty() {
            return Ok(CheckResult::passed(
                self.name(),
                Severity::Warning,
                "Code is in English",
            ));
        }

        Ok(CheckResult::failed(
            self.name(),
            Severity::Warning,
            format!("{} file(s) with German text", offenders.len()),
        )
        .with_detail("files", json!(offenders)))
    }
}

/// Flags German text in `pyproject.toml`.
pub struct PyprojectEnglishCheck;

impl Check for PyprojectEnglishCheck {
    fn name(&self) -> &str {
        "pyproject.toml English"
    }

    fn description(&self) -> &str {
        "Checks pyproject.toml for German characters"
    }

    fn category(&self) -> Category {
        Category::Quality
    }

    fn default_phases(&self) -> &[PhaseId] {
        &[PhaseId::FINAL]
    }

    fn default_params(&self) -> Params {
        params([("german_chars", json!(GERMAN_CHARS))])
    }

    fn run(&self, ctx: &CheckContext, params: &Params) -> anyhow::Result<CheckResult> {
        let chars = params.get_str("german_chars")?;
        let path = ctx.root.join("pyproject.toml");

        if !path.exists() {
            return Ok(CheckResult::not_applicable(
                self.name(),
                "No pyproject.toml (skipped)",
            ));
        }
        let Some(content) = read_lossy(&path) else {
            return Ok(CheckResult::not_applicable(
                self.name(),
                "Could not read pyproject.toml (skipped)",
            ));
        };

        Ok(if contains_any_char(&content, chars) {
            CheckResult::failed(
                self.name(),
                Severity::Warning,
                "pyproject.toml contains German characters",
            )
        } else {
            CheckResult::passed(self.name(), Severity::Warning, "pyproject.toml is in English")
        })
    }
}

#[cfg(test)]
#[path = "language_tests.rs"]
mod tests;
