// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Store interfaces the checks read from.
//!
//! The dashboard owns persistence. Checks only see these read-only traits:
//! the settings store (phases, phase matrix, key-value settings) and the
//! issue store (synced scanner issues).

use std::collections::BTreeMap;

use crate::error::Result;
use crate::phase::{Phase, PhaseId, PhaseMatrix, builtin_phases, seed_matrix};
use crate::project::{Issue, IssueQuery};

/// Read access to phases, the phase matrix and generic settings.
pub trait SettingsStore: Send + Sync {
    /// Matrix column for a phase.
    ///
    /// `Ok(None)` means the phase has no matrix at all; an `Err` means the
    /// store itself is unreachable and is fatal for a run.
    fn phase_matrix(&self, phase: PhaseId) -> Result<Option<PhaseMatrix>>;

    /// Look up a phase definition.
    fn phase(&self, id: PhaseId) -> Option<Phase>;

    /// Generic string setting.
    fn setting(&self, key: &str) -> Option<String>;
}

/// Read access to synced issues.
pub trait IssueStore: Send + Sync {
    fn issues(&self, project_id: &str, query: &IssueQuery) -> Result<Vec<Issue>>;
}

/// In-memory store backing both traits.
///
/// The CLI fills it from `shipcheck.toml` and an issue export; tests build
/// it directly.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    phases: BTreeMap<PhaseId, Phase>,
    matrices: BTreeMap<PhaseId, PhaseMatrix>,
    settings: BTreeMap<String, String>,
    issues: Vec<Issue>,
    seed_fallback: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Store with the builtin phases and the seed matrix.
    pub fn new() -> Self {
        Self {
            phases: builtin_phases().into_iter().map(|p| (p.id, p)).collect(),
            matrices: BTreeMap::new(),
            settings: BTreeMap::new(),
            issues: Vec::new(),
            seed_fallback: true,
        }
    }

    /// Store with builtin phases and no matrix at all.
    pub fn empty() -> Self {
        Self {
            seed_fallback: false,
            ..Self::new()
        }
    }

    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phases.insert(phase.id, phase);
        self
    }

    pub fn with_matrix(mut self, phase: PhaseId, matrix: PhaseMatrix) -> Self {
        self.matrices.insert(phase, matrix);
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    pub fn with_issues(mut self, issues: impl IntoIterator<Item = Issue>) -> Self {
        self.issues.extend(issues);
        self
    }

    pub fn phases(&self) -> impl Iterator<Item = &Phase> {
        self.phases.values()
    }
}

impl SettingsStore for MemoryStore {
    fn phase_matrix(&self, phase: PhaseId) -> Result<Option<PhaseMatrix>> {
        if let Some(matrix) = self.matrices.get(&phase) {
            return Ok(Some(matrix.clone()));
        }
        if self.seed_fallback {
            return Ok(seed_matrix(phase));
        }
        Ok(None)
    }

    fn phase(&self, id: PhaseId) -> Option<Phase> {
        self.phases.get(&id).cloned()
    }

    fn setting(&self, key: &str) -> Option<String> {
        self.settings.get(key).cloned()
    }
}

impl IssueStore for MemoryStore {
    fn issues(&self, project_id: &str, query: &IssueQuery) -> Result<Vec<Issue>> {
        Ok(self
            .issues
            .iter()
            .filter(|i| i.project_id == project_id && query.matches(i))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
