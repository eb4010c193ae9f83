// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project-defined command checks loaded from a TOML manifest.
//!
//! ```toml
//! [[check]]
//! name = "Mypy"
//! description = "Static type check"
//! phases = [3, 4]
//! command = ["mypy", "src"]
//! timeout = 120
//! severity = "error"
//! ```
//!
//! Exit status 0 passes; anything else fails at the entry's severity. A
//! missing executable or a timeout is a skip. The effective params are passed
//! to the command as JSON in `SHIPCHECK_PARAMS`, the phase in
//! `SHIPCHECK_PHASE`.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use serde::Deserialize;

use crate::check::{Category, Check, CheckContext, CheckResult, Params, Severity};
use crate::phase::{ALL_PHASES, PhaseId};
use crate::process::{ToolOutcome, resolve_tool, run_with_timeout};
use crate::registry::CheckSource;

/// One `[[check]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "ManifestEntry::default_category")]
    pub category: String,
    #[serde(default)]
    pub phases: Option<Vec<PhaseId>>,
    pub command: Vec<String>,
    #[serde(default = "ManifestEntry::default_timeout")]
    pub timeout: u64,
    #[serde(default = "ManifestEntry::default_severity")]
    pub severity: Severity,
    #[serde(default)]
    pub params: Params,
}

impl ManifestEntry {
    fn default_category() -> String {
        "custom".to_string()
    }

    fn default_timeout() -> u64 {
        60
    }

    fn default_severity() -> Severity {
        Severity::Warning
    }
}

/// A check that runs an external command.
#[derive(Debug, Clone)]
pub struct CommandCheck {
    name: String,
    description: String,
    category: Category,
    phases: Vec<PhaseId>,
    program: String,
    args: Vec<String>,
    timeout: Duration,
    severity: Severity,
    params: Params,
}

impl CommandCheck {
    pub fn from_entry(entry: ManifestEntry) -> anyhow::Result<Self> {
        if entry.name.trim().is_empty() {
            bail!("check name must not be empty");
        }
        let category: Category = entry
            .category
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;
        let mut argv = entry.command.into_iter();
        let Some(program) = argv.next() else {
            bail!("check '{}' has an empty command", entry.name);
        };

        Ok(Self {
            description: if entry.description.is_empty() {
                format!("Runs {program}")
            } else {
                entry.description
            },
            name: entry.name,
            category,
            phases: entry.phases.unwrap_or_else(|| ALL_PHASES.to_vec()),
            program,
            args: argv.collect(),
            timeout: Duration::from_secs(entry.timeout),
            severity: entry.severity,
            params: entry.params,
        })
    }

    /// Program path: bare names are looked up like the builtin tools,
    /// anything with a separator is taken relative to the project root.
    fn program_path(&self, root: &Path) -> Option<PathBuf> {
        if self.program.contains('/') {
            Some(root.join(&self.program))
        } else {
            resolve_tool(root, &self.program)
        }
    }
}

/// First non-blank line of the command's output, if any.
fn summary_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|l| !l.is_empty())
}

impl Check for CommandCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> Category {
        self.category
    }

    fn default_phases(&self) -> &[PhaseId] {
        &self.phases
    }

    fn default_params(&self) -> Params {
        self.params.clone()
    }

    fn run(&self, ctx: &CheckContext, params: &Params) -> anyhow::Result<CheckResult> {
        let Some(program) = self.program_path(ctx.root) else {
            return Ok(CheckResult::skipped(
                &self.name,
                format!("{} not available", self.program),
            ));
        };

        let mut cmd = Command::new(program);
        cmd.args(&self.args)
            .current_dir(ctx.root)
            .env("SHIPCHECK_PARAMS", serde_json::to_string(params)?)
            .env("SHIPCHECK_PHASE", ctx.phase.to_string());

        let output = match run_with_timeout(cmd, self.timeout)
            .with_context(|| format!("failed to run {}", self.program))?
        {
            ToolOutcome::Completed(output) => output,
            ToolOutcome::NotFound => {
                return Ok(CheckResult::skipped(
                    &self.name,
                    format!("{} not available", self.program),
                ));
            }
            ToolOutcome::TimedOut(_) => return Ok(CheckResult::skipped(&self.name, "timeout")),
        };

        let combined = output.combined();
        let detail = summary_line(&combined);
        if output.success() {
            return Ok(CheckResult::passed(
                &self.name,
                self.severity,
                detail.unwrap_or("Command succeeded").to_string(),
            ));
        }

        let status = match output.status.code() {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_string(),
        };
        let message = match detail {
            Some(line) => format!("{status}: {line}"),
            None => status,
        };
        Ok(CheckResult::failed(&self.name, self.severity, message))
    }
}

#[derive(Deserialize)]
struct Manifest {
    #[serde(default)]
    check: Vec<toml::Value>,
}

/// Loads [`CommandCheck`]s from a manifest file.
#[derive(Debug, Clone)]
pub struct ManifestSource {
    path: PathBuf,
}

impl ManifestSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse manifest content. Invalid entries are logged and dropped.
    pub fn parse(content: &str, origin: &Path) -> anyhow::Result<Vec<CommandCheck>> {
        let manifest: Manifest = toml::from_str(content)
            .with_context(|| format!("invalid manifest {}", origin.display()))?;

        let mut checks = Vec::new();
        for (index, value) in manifest.check.into_iter().enumerate() {
            let loaded = ManifestEntry::deserialize(value)
                .map_err(anyhow::Error::from)
                .and_then(CommandCheck::from_entry);
            match loaded {
                Ok(check) => checks.push(check),
                Err(e) => tracing::warn!(
                    "{}: skipping check #{}: {e:#}",
                    origin.display(),
                    index + 1
                ),
            }
        }
        Ok(checks)
    }
}

impl CheckSource for ManifestSource {
    fn name(&self) -> &str {
        "manifest"
    }

    fn load(&self) -> anyhow::Result<Vec<Arc<dyn Check>>> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let checks = Self::parse(&content, &self.path)?;
        Ok(checks
            .into_iter()
            .map(|c| Arc::new(c) as Arc<dyn Check>)
            .collect())
    }
}

#[cfg(test)]
#[path = "custom_tests.rs"]
mod tests;
