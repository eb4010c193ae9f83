// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project and issue types consumed by the checks.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::phase::PhaseId;

/// A project under release-readiness review.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    /// Identity used for issue lookups (None for unregistered projects).
    pub id: Option<String>,
    pub name: String,
    /// Project root directory.
    pub path: PathBuf,
    /// Current lifecycle phase (None = not yet assigned).
    pub phase: Option<PhaseId>,
}

impl Project {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            id: None,
            name,
            path,
            phase: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_phase(mut self, phase: PhaseId) -> Self {
        self.phase = Some(phase);
        self
    }
}

/// Issue priority as reported by the code scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "critical" => Ok(Priority::Critical),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("unknown priority '{s}'")),
        }
    }
}

/// Triage status of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    Open,
    Ignored,
    Fixed,
}

impl FromStr for IssueStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(IssueStatus::Open),
            "ignored" => Ok(IssueStatus::Ignored),
            "fixed" => Ok(IssueStatus::Fixed),
            _ => Err(format!("unknown status '{s}'")),
        }
    }
}

/// A synced code-scanner issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub project_id: String,
    pub priority: Priority,
    pub status: IssueStatus,
    pub is_false_positive: bool,
    pub title: String,
}

/// Filter for issue lookups. `None` fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueQuery {
    pub priority: Option<Priority>,
    pub status: Option<IssueStatus>,
    pub is_false_positive: Option<bool>,
}

impl IssueQuery {
    /// Open, non-false-positive issues of one priority.
    pub fn open(priority: Priority) -> Self {
        Self {
            priority: Some(priority),
            status: Some(IssueStatus::Open),
            is_false_positive: Some(false),
        }
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        self.priority.is_none_or(|p| p == issue.priority)
            && self.status.is_none_or(|s| s == issue.status)
            && self
                .is_false_positive
                .is_none_or(|fp| fp == issue.is_false_positive)
    }
}

/// Raw issue row as exported by the sync tool.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRecord {
    pub project_id: String,
    pub priority: String,
    #[serde(default = "IssueRecord::default_status")]
    pub status: String,
    #[serde(default)]
    pub is_false_positive: bool,
    #[serde(default)]
    pub title: String,
}

impl IssueRecord {
    fn default_status() -> String {
        "open".to_string()
    }

    /// Map an exported row onto an [`Issue`], rejecting unknown labels.
    pub fn into_issue(self, index: usize) -> Result<Issue> {
        let priority = self
            .priority
            .parse()
            .map_err(|message| Error::IssueRecord { index, message })?;
        let status = self
            .status
            .parse()
            .map_err(|message| Error::IssueRecord { index, message })?;
        Ok(Issue {
            project_id: self.project_id,
            priority,
            status,
            is_false_positive: self.is_false_positive,
            title: self.title,
        })
    }
}

/// Parse a JSON issue export (array of records).
pub fn parse_issue_export(content: &str) -> Result<Vec<Issue>> {
    let records: Vec<IssueRecord> =
        serde_json::from_str(content).map_err(|e| Error::Config {
            message: format!("invalid issue export: {e}"),
            path: None,
        })?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_issue(index))
        .collect()
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
