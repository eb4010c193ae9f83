// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check trait and result types.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::phase::{ALL_PHASES, PhaseId};
use crate::project::Project;
use crate::store::{IssueStore, SettingsStore};

/// Check parameters: name -> JSON value.
pub type Params = std::collections::BTreeMap<String, JsonValue>;

/// Importance of a result.
///
/// Ordered by rank: errors sort before warnings, warnings before info.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Release blocker.
    Error,
    /// Recommended, not blocking.
    Warning,
    /// Skipped, not applicable, or diagnostic.
    Info,
}

impl Severity {
    pub fn rank(self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            _ => Err(format!("unknown severity '{s}' (expected error, warning or info)")),
        }
    }
}

/// Catalog grouping. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Files,
    Quality,
    Git,
    Issues,
    Security,
    General,
    Custom,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Files => "files",
            Category::Quality => "quality",
            Category::Git => "git",
            Category::Issues => "issues",
            Category::Security => "security",
            Category::General => "general",
            Category::Custom => "custom",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "files" => Ok(Category::Files),
            "quality" => Ok(Category::Quality),
            "git" => Ok(Category::Git),
            "issues" => Ok(Category::Issues),
            "security" => Ok(Category::Security),
            "general" => Ok(Category::General),
            "custom" => Ok(Category::Custom),
            _ => Err(format!("unknown category '{s}'")),
        }
    }
}

/// Context passed to every check.
pub struct CheckContext<'a> {
    /// Project root directory.
    pub root: &'a Path,
    pub project: &'a Project,
    /// Effective phase for this run.
    pub phase: PhaseId,
    pub settings: &'a dyn SettingsStore,
    /// Issue store (None when no issues are synced).
    pub issues: Option<&'a dyn IssueStore>,
}

/// A single release-readiness rule.
///
/// Implementors are stateless descriptors; per-run parameters arrive
/// through [`ConfiguredCheck`]. Object-safe for `Arc<dyn Check>`.
pub trait Check: Send + Sync {
    /// Unique name; primary key in the phase matrix.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn category(&self) -> Category {
        Category::General
    }

    /// Phases the check runs in when the matrix has no entry for it.
    fn default_phases(&self) -> &[PhaseId] {
        ALL_PHASES
    }

    fn default_params(&self) -> Params {
        Params::new()
    }

    /// Evaluate the project.
    ///
    /// Implementations should:
    /// - Return `CheckResult::skipped()` when a tool, file or store is missing
    /// - Bound every external process with a timeout
    /// - Only read from the project
    ///
    /// An `Err` is reported by the runner as a hard failure.
    fn run(&self, ctx: &CheckContext, params: &Params) -> anyhow::Result<CheckResult>;
}

/// One check instance for one run: the check plus its own parameter set.
#[derive(Clone)]
pub struct ConfiguredCheck {
    check: Arc<dyn Check>,
    params: Params,
}

impl ConfiguredCheck {
    /// Instantiate with a private copy of the check's default params.
    pub fn new(check: Arc<dyn Check>) -> Self {
        let params = check.default_params();
        Self { check, params }
    }

    /// Merge overrides into the params; unspecified keys keep defaults.
    pub fn configure(&mut self, overrides: &Params) {
        for (key, value) in overrides {
            self.params.insert(key.clone(), value.clone());
        }
    }

    pub fn name(&self) -> &str {
        self.check.name()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn run(&self, ctx: &CheckContext) -> anyhow::Result<CheckResult> {
        self.check.run(ctx, &self.params)
    }
}

impl fmt::Debug for ConfiguredCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredCheck")
            .field("name", &self.check.name())
            .field("params", &self.params)
            .finish()
    }
}

/// Typed access to check parameters.
pub trait ParamsExt {
    fn value(&self, key: &str) -> anyhow::Result<&JsonValue>;

    fn get_u64(&self, key: &str) -> anyhow::Result<u64> {
        self.value(key)?
            .as_u64()
            .ok_or_else(|| anyhow!("parameter '{key}' must be a non-negative integer"))
    }

    fn get_str(&self, key: &str) -> anyhow::Result<&str> {
        self.value(key)?
            .as_str()
            .ok_or_else(|| anyhow!("parameter '{key}' must be a string"))
    }

    fn get_list(&self, key: &str) -> anyhow::Result<Vec<String>> {
        let value = self.value(key)?;
        serde_json::from_value(value.clone())
            .with_context(|| format!("parameter '{key}' must be a list of strings"))
    }
}

impl ParamsExt for Params {
    fn value(&self, key: &str) -> anyhow::Result<&JsonValue> {
        self.get(key)
            .ok_or_else(|| anyhow!("missing parameter '{key}'"))
    }
}

/// Build a [`Params`] from `(key, value)` pairs.
pub fn params<const N: usize>(pairs: [(&str, JsonValue); N]) -> Params {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Outcome of one check.
///
/// `passed` and `severity` are independent: a failing `info` result means
/// "not applicable", a passing `error` result means "blocker satisfied".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    /// Name of the check that produced it.
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub severity: Severity,
    /// Structured payload for drill-down (omitted if empty).
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub details: Map<String, JsonValue>,
}

impl CheckResult {
    pub fn passed(name: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: message.into(),
            severity,
            details: Map::new(),
        }
    }

    pub fn failed(name: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: message.into(),
            severity,
            details: Map::new(),
        }
    }

    /// Capability unavailable: `Skipped (<reason>)`, info, passed.
    pub fn skipped(name: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::passed(name, Severity::Info, format!("Skipped ({reason})"))
    }

    /// Nothing to check, with a custom message. Info, passed.
    pub fn not_applicable(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::passed(name, Severity::Info, message)
    }

    /// Hard failure for a check that crashed.
    pub fn errored(name: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self::failed(name, Severity::Error, format!("Error: {cause}"))
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.details.insert(key.into(), value);
        self
    }

    /// True for passed info results that report a skip rather than a
    /// finding: `Skipped (..)` or a message ending in `(skipped)`.
    pub fn is_skip(&self) -> bool {
        self.passed
            && self.severity == Severity::Info
            && (self.message.starts_with("Skipped (") || self.message.ends_with("(skipped)"))
    }

    /// True for failures that block a release.
    pub fn is_blocker(&self) -> bool {
        !self.passed && self.severity == Severity::Error
    }
}

/// Aggregated results of a run, as handed to consumers.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// RFC 3339 timestamp.
    pub timestamp: String,
    pub phase: PhaseId,
    /// Number of passing results.
    pub passed: usize,
    pub total: usize,
    /// No error-severity failure.
    pub ready: bool,
    pub checks: Vec<CheckResult>,
}

impl CheckReport {
    pub fn new(timestamp: String, phase: PhaseId, checks: Vec<CheckResult>) -> Self {
        let passed = checks.iter().filter(|c| c.passed).count();
        let ready = !checks.iter().any(CheckResult::is_blocker);
        Self {
            timestamp,
            phase,
            passed,
            total: checks.len(),
            ready,
            checks,
        }
    }

    pub fn blockers(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| c.is_blocker())
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
