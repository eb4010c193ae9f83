// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in check table.
//!
//! All 18 built-in checks are listed here, grouped by category:
//! - files: LICENSE, README, CHANGELOG, README English, Hobby Notice, README Status
//! - quality: Radon Complexity, Ruff, Code English, pyproject.toml English,
//!   Tests, Coverage, i18n Support
//! - git: Git Status, Gitignore Patterns
//! - issues: Critical Issues, High Issues
//! - security: Gradio Share
//!
//! Project-specific checks come from a manifest (see [`custom`]).

pub mod changelog;
pub mod custom;
pub mod git;
pub mod gradio;
pub mod issues;
pub mod language;
pub mod license;
pub mod pytest;
pub mod quality;
pub mod readme;
pub mod scan;

use std::sync::Arc;

use crate::check::Check;

/// Built-in check names in canonical order.
pub const CHECK_NAMES: &[&str] = &[
    "LICENSE",
    "README",
    "CHANGELOG",
    "README English",
    "Hobby Notice",
    "README Status",
    "Radon Complexity",
    "Ruff",
    "Code English",
    "pyproject.toml English",
    "Tests",
    "Coverage",
    "i18n Support",
    "Git Status",
    "Gitignore Patterns",
    "Critical Issues",
    "High Issues",
    "Gradio Share",
];

/// Create all built-in checks.
pub fn builtin_checks() -> Vec<Arc<dyn Check>> {
    vec![
        Arc::new(license::LicenseCheck),
        Arc::new(readme::ReadmeCheck),
        Arc::new(changelog::ChangelogCheck),
        Arc::new(readme::ReadmeEnglishCheck),
        Arc::new(readme::HobbyNoticeCheck),
        Arc::new(readme::ReadmeStatusCheck),
        Arc::new(quality::RadonComplexityCheck),
        Arc::new(quality::RuffCheck),
        Arc::new(language::CodeEnglishCheck),
        Arc::new(language::PyprojectEnglishCheck),
        Arc::new(pytest::TestsCheck),
        Arc::new(pytest::CoverageCheck),
        Arc::new(gradio::I18nCheck),
        Arc::new(git::GitStatusCheck),
        Arc::new(git::GitignorePatternsCheck),
        Arc::new(issues::CRITICAL_ISSUES),
        Arc::new(issues::HIGH_ISSUES),
        Arc::new(gradio::GradioShareCheck),
    ]
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
