// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Phase-gated release-readiness checks.
//!
//! A [`CheckRegistry`] holds named checks; the [`CheckRunner`] selects the
//! ones the phase matrix enables for a project's lifecycle phase, runs them
//! in parallel and returns results ordered by severity.

pub mod catalog;
pub mod check;
pub mod checks;
pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod error;
pub mod git;
pub mod output;
pub mod phase;
pub mod process;
pub mod project;
pub mod registry;
pub mod runner;
pub mod session;
pub mod store;

pub use catalog::{CheckInfo, get_all_checks};
pub use check::{Category, Check, CheckContext, CheckReport, CheckResult, Params, Severity};
pub use cli::{CheckArgs, Cli, Command, ListArgs, MatrixArgs, OutputFormat};
pub use config::Config;
pub use error::{Error, ExitCode, Result};
pub use phase::{MatrixEntry, Phase, PhaseId, PhaseMatrix};
pub use project::{Issue, IssueQuery, Priority, Project};
pub use registry::{CheckRegistry, CheckSource};
pub use runner::{CheckRunner, FallbackPolicy, RunnerConfig, Stores, run_checks};
pub use store::{IssueStore, MemoryStore, SettingsStore};

#[cfg(test)]
pub mod test_utils;
