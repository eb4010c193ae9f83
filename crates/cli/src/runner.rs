// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Phase-aware parallel check runner with error recovery.
//!
//! The runner resolves the effective phase, consults that phase's matrix to
//! decide which checks run and at what severity, then runs the selection on
//! a bounded rayon pool. One check failing or panicking never prevents the
//! others from reporting.

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::check::{
    Check, CheckContext, CheckReport, CheckResult, ConfiguredCheck, Params, Severity,
};
use crate::error::{Error, Result};
use crate::phase::{MatrixEntry, PhaseId};
use crate::project::Project;
use crate::registry::CheckRegistry;
use crate::store::{IssueStore, SettingsStore};

/// What happens to a check the phase matrix does not mention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Run it if the phase is one of the check's default phases.
    #[default]
    Defaults,
    /// Don't run it.
    Skip,
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "defaults" => Ok(FallbackPolicy::Defaults),
            "skip" => Ok(FallbackPolicy::Skip),
            _ => Err(format!(
                "unknown fallback policy '{s}' (expected defaults or skip)"
            )),
        }
    }
}

/// Configuration for the check runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Upper bound on concurrently running checks.
    pub workers: usize,
    /// Phase used when neither an override nor the project sets one.
    pub default_phase: PhaseId,
    pub fallback: FallbackPolicy,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            workers: 8,
            default_phase: PhaseId::INITIAL,
            fallback: FallbackPolicy::Defaults,
        }
    }
}

/// Stores the checks read from during a run.
#[derive(Clone, Copy)]
pub struct Stores<'a> {
    pub settings: &'a dyn SettingsStore,
    pub issues: Option<&'a dyn IssueStore>,
}

/// Why a check does or does not run in a phase.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Enabled by its matrix entry.
    Configured { severity: Severity, params: Params },
    /// Disabled by its matrix entry.
    Disabled,
    /// No entry; the phase is one of its default phases.
    DefaultPhase,
    /// No entry; the phase is not one of its default phases.
    NotDefaultPhase,
    /// No entry and the fallback policy is `skip`.
    NoEntry,
}

impl Decision {
    pub fn runs(&self) -> bool {
        matches!(self, Decision::Configured { .. } | Decision::DefaultPhase)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Configured { severity, .. } => write!(f, "matrix ({severity})"),
            Decision::Disabled => f.write_str("disabled in matrix"),
            Decision::DefaultPhase => f.write_str("default phase"),
            Decision::NotDefaultPhase => f.write_str("not a default phase"),
            Decision::NoEntry => f.write_str("no matrix entry"),
        }
    }
}

/// One check's planned treatment.
#[derive(Clone)]
pub struct PlannedCheck {
    pub check: Arc<dyn Check>,
    pub decision: Decision,
}

impl fmt::Debug for PlannedCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlannedCheck")
            .field("name", &self.check.name())
            .field("decision", &self.decision)
            .finish()
    }
}

/// The selection for one phase, in registry order.
#[derive(Debug, Clone)]
pub struct Plan {
    pub phase: PhaseId,
    pub checks: Vec<PlannedCheck>,
}

impl Plan {
    pub fn selected(&self) -> impl Iterator<Item = &PlannedCheck> {
        self.checks.iter().filter(|p| p.decision.runs())
    }
}

/// Replace a result's severity with the configured one.
///
/// Info results (skips, not-applicable) are never re-ranked.
pub fn apply_severity(mut result: CheckResult, severity: Severity) -> CheckResult {
    if result.severity != Severity::Info {
        result.severity = severity;
    }
    result
}

/// Order results by (severity rank, name).
pub fn sort_results(results: &mut [CheckResult]) {
    results.sort_by(|a, b| {
        a.severity
            .rank()
            .cmp(&b.severity.rank())
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// The check runner executes the checks of one phase in parallel.
#[derive(Debug, Clone, Default)]
pub struct CheckRunner {
    config: RunnerConfig,
}

impl CheckRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Override, else the project's phase, else the configured default.
    pub fn effective_phase(&self, project: &Project, phase_override: Option<PhaseId>) -> PhaseId {
        phase_override
            .or(project.phase)
            .unwrap_or(self.config.default_phase)
    }

    /// Decide, for every registered check, whether and how it runs.
    pub fn plan(
        &self,
        registry: &CheckRegistry,
        settings: &dyn SettingsStore,
        phase: PhaseId,
    ) -> Result<Plan> {
        let matrix = settings.phase_matrix(phase)?.unwrap_or_default();

        let checks = registry
            .get_all()
            .into_iter()
            .map(|check| {
                let decision = match matrix.get(check.name()) {
                    Some(MatrixEntry { enabled: false, .. }) => Decision::Disabled,
                    Some(entry) => Decision::Configured {
                        severity: entry.severity,
                        params: entry.params.clone(),
                    },
                    None => match self.config.fallback {
                        FallbackPolicy::Skip => Decision::NoEntry,
                        FallbackPolicy::Defaults if check.default_phases().contains(&phase) => {
                            Decision::DefaultPhase
                        }
                        FallbackPolicy::Defaults => Decision::NotDefaultPhase,
                    },
                };
                tracing::debug!("phase {phase}: {}: {decision}", check.name());
                PlannedCheck { check, decision }
            })
            .collect();

        Ok(Plan { phase, checks })
    }

    /// Run the checks selected for the effective phase.
    ///
    /// Results are sorted by (severity rank, name). Only a failing settings
    /// store is an error; check failures become results.
    pub fn run(
        &self,
        registry: &CheckRegistry,
        project: &Project,
        stores: Stores<'_>,
        phase_override: Option<PhaseId>,
    ) -> Result<Vec<CheckResult>> {
        let phase = self.effective_phase(project, phase_override);
        let plan = self.plan(registry, stores.settings, phase)?;

        let selected: Vec<(ConfiguredCheck, Option<Severity>)> = plan
            .selected()
            .map(|planned| {
                let mut instance = ConfiguredCheck::new(planned.check.clone());
                match &planned.decision {
                    Decision::Configured { severity, params } => {
                        instance.configure(params);
                        (instance, Some(*severity))
                    }
                    _ => (instance, None),
                }
            })
            .collect();
        tracing::debug!("phase {phase}: running {} check(s)", selected.len());

        let ctx = CheckContext {
            root: &project.path,
            project,
            phase,
            settings: stores.settings,
            issues: stores.issues,
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers.max(1))
            .build()
            .map_err(|e| Error::Internal(format!("failed to start worker pool: {e}")))?;

        let mut results: Vec<CheckResult> = pool.install(|| {
            selected
                .into_par_iter()
                .map(|(instance, severity)| match Self::run_one(&instance, &ctx) {
                    Ok(result) => match severity {
                        Some(severity) => apply_severity(result, severity),
                        None => result,
                    },
                    // A crash stays a hard failure whatever the matrix says.
                    Err(crashed) => crashed,
                })
                .collect()
        });

        sort_results(&mut results);
        Ok(results)
    }

    /// Run and wrap the results with a timestamp and summary.
    pub fn report(
        &self,
        registry: &CheckRegistry,
        project: &Project,
        stores: Stores<'_>,
        phase_override: Option<PhaseId>,
    ) -> Result<CheckReport> {
        let phase = self.effective_phase(project, phase_override);
        let results = self.run(registry, project, stores, Some(phase))?;
        Ok(CheckReport::new(
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            phase,
            results,
        ))
    }

    /// Run one check.
    ///
    /// `Ok` carries the check's own result; `Err` carries the hard failure
    /// synthesized for a check that returned an error or panicked.
    fn run_one(
        instance: &ConfiguredCheck,
        ctx: &CheckContext,
    ) -> std::result::Result<CheckResult, CheckResult> {
        let start = Instant::now();
        let result = match catch_unwind(AssertUnwindSafe(|| instance.run(ctx))) {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => Err(CheckResult::errored(instance.name(), format!("{e:#}"))),
            Err(payload) => Err(CheckResult::errored(
                instance.name(),
                format!("check panicked: {}", panic_message(payload.as_ref())),
            )),
        };
        tracing::trace!("{} finished in {:?}", instance.name(), start.elapsed());
        result
    }
}

/// Run the checks for `project` with the default runner configuration.
pub fn run_checks(
    registry: &CheckRegistry,
    project: &Project,
    stores: Stores<'_>,
    phase_override: Option<PhaseId>,
) -> Result<Vec<CheckResult>> {
    CheckRunner::default().run(registry, project, stores, phase_override)
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
