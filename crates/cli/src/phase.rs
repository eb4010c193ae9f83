// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle phases and the per-phase check matrix.
//!
//! A project sits in one phase at a time. The matrix maps
//! `(phase, check name)` to whether the check runs in that phase and at
//! which severity its failures are reported.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::check::{Params, Severity};

/// Identifier of a lifecycle phase (1 = Initial .. 4 = Final).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PhaseId(pub u8);

impl PhaseId {
    pub const INITIAL: PhaseId = PhaseId(1);
    pub const DEVELOPMENT: PhaseId = PhaseId(2);
    pub const TESTING: PhaseId = PhaseId(3);
    pub const FINAL: PhaseId = PhaseId(4);
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every builtin phase, in lifecycle order.
pub const ALL_PHASES: &[PhaseId] = &[
    PhaseId::INITIAL,
    PhaseId::DEVELOPMENT,
    PhaseId::TESTING,
    PhaseId::FINAL,
];

/// A named lifecycle phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub id: PhaseId,
    /// Internal name (e.g. "testing").
    pub name: String,
    /// Name shown to humans and expected in the README status line.
    pub display_name: String,
}

impl Phase {
    pub fn new(id: PhaseId, name: &str, display_name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

/// The four builtin phases.
pub fn builtin_phases() -> Vec<Phase> {
    vec![
        Phase::new(PhaseId::INITIAL, "initial", "Initial"),
        Phase::new(PhaseId::DEVELOPMENT, "development", "Development"),
        Phase::new(PhaseId::TESTING, "testing", "Testing"),
        Phase::new(PhaseId::FINAL, "final", "Final"),
    ]
}

/// One cell of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatrixEntry {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub severity: Severity,
    /// Parameter overrides merged over the check's defaults.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: Params,
}

fn default_enabled() -> bool {
    true
}

impl MatrixEntry {
    pub fn enabled(severity: Severity) -> Self {
        Self {
            enabled: true,
            severity,
            params: Params::new(),
        }
    }

    pub fn disabled(severity: Severity) -> Self {
        Self {
            enabled: false,
            severity,
            params: Params::new(),
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }
}

/// Matrix column for a single phase: check name -> entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhaseMatrix {
    entries: BTreeMap<String, MatrixEntry>,
}

impl PhaseMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, check: impl Into<String>, entry: MatrixEntry) {
        self.entries.insert(check.into(), entry);
    }

    pub fn with(mut self, check: impl Into<String>, entry: MatrixEntry) -> Self {
        self.insert(check, entry);
        self
    }

    pub fn get(&self, check: &str) -> Option<&MatrixEntry> {
        self.entries.get(check)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MatrixEntry)> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Seed row: check name and its (enabled, severity) per builtin phase.
type SeedRow = (&'static str, [(bool, Severity); 4]);

const SEED: &[SeedRow] = {
    use Severity::{Error as E, Info as I, Warning as W};
    &[
        ("LICENSE", [(true, E), (true, E), (true, E), (true, E)]),
        ("README", [(true, E), (true, E), (true, E), (true, E)]),
        ("CHANGELOG", [(false, I), (false, I), (true, W), (true, E)]),
        ("Critical Issues", [(true, E), (true, E), (true, E), (true, E)]),
        ("High Issues", [(false, I), (true, W), (true, W), (true, E)]),
        ("Radon Complexity", [(false, I), (true, E), (true, W), (true, W)]),
        ("Ruff", [(true, W), (true, E), (true, W), (true, E)]),
        ("Tests", [(true, W), (true, W), (true, E), (true, E)]),
        ("Git Status", [(false, I), (false, I), (true, W), (true, E)]),
        ("README Status", [(true, W), (true, W), (true, W), (true, E)]),
        ("Gitignore Patterns", [(true, W), (true, W), (true, W), (true, E)]),
        ("Gradio Share", [(false, I), (true, W), (true, E), (true, E)]),
    ]
};

/// Matrix shipped for a builtin phase when the configuration has none.
///
/// Checks absent from the seed are resolved by the runner's fallback policy.
pub fn seed_matrix(phase: PhaseId) -> Option<PhaseMatrix> {
    let column = ALL_PHASES.iter().position(|p| *p == phase)?;
    let mut matrix = PhaseMatrix::new();
    for (name, cells) in SEED {
        let (enabled, severity) = cells[column];
        matrix.insert(
            *name,
            MatrixEntry {
                enabled,
                severity,
                params: Params::new(),
            },
        );
    }
    Some(matrix)
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
