// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! README checks: presence, language, hobby disclaimer, status line.

use aho_corasick::AhoCorasick;
use regex::Regex;
use serde_json::json;

use super::scan::{contains_any_char, read_lossy, read_readme};
use crate::check::{
    Category, Check, CheckContext, CheckResult, Params, ParamsExt, Severity, params,
};
use crate::phase::PhaseId;

/// Characters that mark a text as German.
pub const GERMAN_CHARS: &str = "äöüÄÖÜß";

const NO_README: &str = "No README found (skipped)";

/// Requires a README with some content.
pub struct ReadmeCheck;

impl Check for ReadmeCheck {
    fn name(&self) -> &str {
        "README"
    }

    fn description(&self) -> &str {
        "Checks for README.md with minimum content"
    }

    fn category(&self) -> Category {
        Category::Files
    }

    fn default_phases(&self) -> &[PhaseId] {
        &[PhaseId::DEVELOPMENT, PhaseId::TESTING, PhaseId::FINAL]
    }

    fn default_params(&self) -> Params {
        params([
            (
                "allowed_names",
                json!(["README.md", "README.txt", "README", "README.rst"]),
            ),
            ("min_length", json!(50)),
        ])
    }

    fn run(&self, ctx: &CheckContext, params: &Params) -> anyhow::Result<CheckResult> {
        let names = params.get_list("allowed_names")?;
        let min_length = params.get_u64("min_length")? as usize;

        for name in &names {
            let path = ctx.root.join(name);
            if !path.exists() {
                continue;
            }
            let content = read_lossy(&path).unwrap_or_default();
            if content.trim().chars().count() < min_length {
                return Ok(CheckResult::failed(
                    self.name(),
                    Severity::Warning,
                    format!("{name} too short (< {min_length} chars)"),
                ));
            }
            return Ok(CheckResult::passed(
                self.name(),
                Severity::Error,
                format!("{name} found"),
            ));
        }

        Ok(CheckResult::failed(
            self.name(),
            Severity::Error,
            "No README file found",
        ))
    }
}

/// Flags a README written in German.
pub struct ReadmeEnglishCheck;

impl Check for ReadmeEnglishCheck {
    fn name(&self) -> &str {
        "README English"
    }

    fn description(&self) -> &str {
        "Checks README has no German characters"
    }

    fn category(&self) -> Category {
        Category::Files
    }

    fn default_phases(&self) -> &[PhaseId] {
        &[PhaseId::TESTING, PhaseId::FINAL]
    }

    fn default_params(&self) -> Params {
        params([("german_chars", json!(GERMAN_CHARS))])
    }

    fn run(&self, ctx: &CheckContext, params: &Params) -> anyhow::Result<CheckResult> {
        let chars = params.get_str("german_chars")?;
        let Some((name, content)) = read_readme(ctx.root) else {
            return Ok(CheckResult::not_applicable(self.name(), NO_README));
        };

        Ok(if contains_any_char(&content, chars) {
            CheckResult::failed(
                self.name(),
                Severity::Warning,
                format!("{name} contains German characters"),
            )
        } else {
            CheckResult::passed(self.name(), Severity::Warning, format!("{name} is in English"))
        })
    }
}

/// Requires a hobby/experimental disclaimer in the README.
pub struct HobbyNoticeCheck;

impl Check for HobbyNoticeCheck {
    fn name(&self) -> &str {
        "Hobby Notice"
    }

    fn description(&self) -> &str {
        "Checks for hobby/experimental disclaimer in README"
    }

    fn category(&self) -> Category {
        Category::Files
    }

    fn default_phases(&self) -> &[PhaseId] {
        &[PhaseId::FINAL]
    }

    fn default_params(&self) -> Params {
        params([(
            "keywords",
            json!([
                "hobby",
                "experimental",
                "experiment",
                "not a commercial",
                "no warranties",
                "no support",
                "personal project",
            ]),
        )])
    }

    fn run(&self, ctx: &CheckContext, params: &Params) -> anyhow::Result<CheckResult> {
        let keywords = params.get_list("keywords")?;
        let Some((name, content)) = read_readme(ctx.root) else {
            return Ok(CheckResult::not_applicable(self.name(), NO_README));
        };

        // Full Unicode case folding; the matcher itself only folds ASCII.
        let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        let matcher = AhoCorasick::new(&keywords)?;

        Ok(if matcher.is_match(&content.to_lowercase()) {
            CheckResult::passed(
                self.name(),
                Severity::Warning,
                "Hobby/experimental notice found",
            )
        } else {
            CheckResult::failed(
                self.name(),
                Severity::Warning,
                format!("{name} missing hobby/experimental notice"),
            )
        })
    }
}

/// Keeps the README `**Status:**` line in sync with the project phase.
pub struct ReadmeStatusCheck;

impl ReadmeStatusCheck {
    fn expected_phase(ctx: &CheckContext) -> String {
        ctx.project
            .phase
            .and_then(|id| ctx.settings.phase(id))
            .map(|phase| phase.display_name)
            .unwrap_or_else(|| "Development".to_string())
    }
}

impl Check for ReadmeStatusCheck {
    fn name(&self) -> &str {
        "README Status"
    }

    fn description(&self) -> &str {
        "Checks **Status:** line matches project phase"
    }

    fn category(&self) -> Category {
        Category::Files
    }

    fn default_phases(&self) -> &[PhaseId] {
        &[PhaseId::TESTING, PhaseId::FINAL]
    }

    fn run(&self, ctx: &CheckContext, _params: &Params) -> anyhow::Result<CheckResult> {
        let Some((_, content)) = read_readme(ctx.root) else {
            return Ok(CheckResult::not_applicable(self.name(), NO_README));
        };

        let expected = Self::expected_phase(ctx);
        let pattern = Regex::new(r"(?i)\*\*Status:\*\*\s*(\w+)")?;

        let Some(found) = pattern.captures(&content).and_then(|c| c.get(1)) else {
            return Ok(CheckResult::failed(
                self.name(),
                Severity::Warning,
                format!("No status line (expected: {expected})"),
            ));
        };
        let found = found.as_str();

        Ok(if found.to_lowercase() == expected.to_lowercase() {
            CheckResult::passed(
                self.name(),
                Severity::Warning,
                format!("Status in sync: {found}"),
            )
        } else {
            CheckResult::failed(
                self.name(),
                Severity::Warning,
                format!("Status '{found}' != Phase '{expected}'"),
            )
        })
    }
}

#[cfg(test)]
#[path = "readme_tests.rs"]
mod tests;
