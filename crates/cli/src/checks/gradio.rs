// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Checks for Gradio web apps: public share links and UI translations.

use std::path::Path;

use ignore::WalkBuilder;
use regex::Regex;
use serde_json::json;

use super::scan::{python_files, read_lossy, relative};
use crate::check::{
    Category, Check, CheckContext, CheckResult, Params, ParamsExt, Severity, params,
};
use crate::phase::PhaseId;

/// Markers that a Python file builds a Gradio app.
const GRADIO_MARKERS: &[&str] = &["import gradio", "from gradio", "gr.Blocks"];

/// Directories never worth scanning for application code.
const VENDOR_DIRS: &[&str] = &[".venv", "venv", "__pycache__", "node_modules"];

/// Forbids `share=True`, which exposes the app through a public tunnel.
pub struct GradioShareCheck;

impl Check for GradioShareCheck {
    fn name(&self) -> &str {
        "Gradio Share"
    }

    fn description(&self) -> &str {
        "Checks for share=True in Gradio apps (security risk)"
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn default_phases(&self) -> &[PhaseId] {
        &[PhaseId::DEVELOPMENT, PhaseId::TESTING, PhaseId::FINAL]
    }

    fn default_params(&self) -> Params {
        params([
            (
                "skip_dirs",
                json!([".venv", "venv", "__pycache__", "node_modules", "build", "dist"]),
            ),
            ("max_files", json!(100)),
        ])
    }

    fn run(&self, ctx: &CheckContext, params: &Params) -> anyhow::Result<CheckResult> {
        let skip_dirs = params.get_list("skip_dirs")?;
        let max_files = params.get_u64("max_files")? as usize;
        let share = Regex::new(r"share\s*=\s*True")?;

        let mut gradio_files = 0;
        let mut sharing = Vec::new();
        for path in python_files(ctx.root, &skip_dirs, max_files) {
            let Some(content) = read_lossy(&path) else {
                continue;
            };
            if !GRADIO_MARKERS.iter().any(|m| content.contains(m)) {
                continue;
            }
            gradio_files += 1;
            if share.is_match(&content) {
                sharing.push(relative(ctx.root, &path));
            }
        }

        if gradio_files == 0 {
            return Ok(CheckResult::not_applicable(
                self.name(),
                "No Gradio app found (skipped)",
            ));
        }

        if !sharing.is_empty() {
            let shown: Vec<&str> = sharing.iter().take(3).map(String::as_str).collect();
            return Ok(CheckResult::failed(
                self.name(),
                Severity::Error,
                format!("share=True in: {}", shown.join(", ")),
            )
            .with_detail("files", json!(sharing)));
        }

        Ok(CheckResult::passed(
            self.name(),
            Severity::Error,
            format!("All {gradio_files} Gradio file(s) have share=False"),
        ))
    }
}

/// Looks for translation directories or i18n imports.
pub struct I18nCheck;

impl I18nCheck {
    /// True if any directory under `src/` has one of `names`.
    fn has_translation_dir_in_src(root: &Path, names: &[String]) -> bool {
        let src = root.join("src");
        if !src.is_dir() {
            return false;
        }
        WalkBuilder::new(src)
            .standard_filters(false)
            .build()
            .filter_map(Result::ok)
            .filter(|e| e.depth() > 0 && e.file_type().is_some_and(|t| t.is_dir()))
            .any(|e| {
                let name = e.file_name().to_string_lossy();
                names.iter().any(|n| *n == name)
            })
    }
}

impl Check for I18nCheck {
    fn name(&self) -> &str {
        "i18n Support"
    }

    fn description(&self) -> &str {
        "Checks for translations directory or i18n imports"
    }

    fn category(&self) -> Category {
        Category::Quality
    }

    fn default_phases(&self) -> &[PhaseId] {
        &[PhaseId::FINAL]
    }

    fn default_params(&self) -> Params {
        params([
            (
                "trans_dirs",
                json!(["translations", "locales", "i18n", "locale"]),
            ),
            (
                "i18n_imports",
                json!(["gradio_i18n", "gettext", "babel", "i18n"]),
            ),
            ("max_files", json!(50)),
        ])
    }

    fn run(&self, ctx: &CheckContext, params: &Params) -> anyhow::Result<CheckResult> {
        let trans_dirs = params.get_list("trans_dirs")?;
        let imports = params.get_list("i18n_imports")?;
        let max_files = params.get_u64("max_files")? as usize;

        let found = trans_dirs.iter().any(|d| ctx.root.join(d).exists())
            || Self::has_translation_dir_in_src(ctx.root, &trans_dirs)
            || {
                let vendor: Vec<String> = VENDOR_DIRS.iter().map(|d| d.to_string()).collect();
                python_files(ctx.root, &vendor, max_files).iter().any(|path| {
                    read_lossy(path)
                        .is_some_and(|content| imports.iter().any(|i| content.contains(i.as_str())))
                })
            };

        Ok(if found {
            CheckResult::passed(self.name(), Severity::Warning, "i18n/translations found")
        } else {
            CheckResult::failed(
                self.name(),
                Severity::Warning,
                "No i18n/translations found",
            )
        })
    }
}

#[cfg(test)]
#[path = "gradio_tests.rs"]
mod tests;
