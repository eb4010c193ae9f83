// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles shipcheck.toml parsing with version validation and unknown key
//! warnings. The parsed config supplies the runner settings, the project
//! description and the contents of the in-memory settings/issue store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::phase::{Phase, PhaseId, PhaseMatrix};
use crate::project::{Project, parse_issue_export};
use crate::runner::{FallbackPolicy, RunnerConfig};
use crate::store::MemoryStore;

/// Config file name looked up during discovery.
pub const CONFIG_FILE: &str = "shipcheck.toml";

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &[
    "version", "runner", "registry", "project", "settings", "phases", "matrix",
];

/// Full configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    #[serde(default)]
    pub runner: RunnerSection,

    #[serde(default)]
    pub registry: RegistrySection,

    #[serde(default)]
    pub project: ProjectSection,

    /// Free-form settings; non-string values are stored as JSON.
    #[serde(default)]
    pub settings: BTreeMap<String, toml::Value>,

    /// Extra or renamed phases.
    #[serde(default)]
    pub phases: Vec<Phase>,

    /// Phase matrix, keyed by phase id.
    #[serde(default)]
    pub matrix: BTreeMap<String, PhaseMatrix>,
}

/// `[runner]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerSection {
    /// Maximum concurrent checks (default: 8).
    #[serde(default = "RunnerSection::default_workers")]
    pub workers: usize,

    /// Phase for projects without one (default: 1).
    #[serde(default = "RunnerSection::default_phase")]
    pub default_phase: PhaseId,

    #[serde(default)]
    pub fallback: FallbackPolicy,
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            workers: Self::default_workers(),
            default_phase: Self::default_phase(),
            fallback: FallbackPolicy::default(),
        }
    }
}

impl RunnerSection {
    fn default_workers() -> usize {
        8
    }

    fn default_phase() -> PhaseId {
        PhaseId::INITIAL
    }
}

/// `[registry]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    /// Custom check manifest, relative to the config file.
    pub manifest: Option<PathBuf>,
}

/// `[project]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSection {
    /// Identifier used to look up synced issues.
    pub id: Option<String>,
    pub name: Option<String>,
    pub phase: Option<PhaseId>,
    /// JSON issue export, relative to the config file.
    pub issues: Option<PathBuf>,
}

impl Config {
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            workers: self.runner.workers,
            default_phase: self.runner.default_phase,
            fallback: self.runner.fallback,
        }
    }

    /// Describe the project rooted at `root`.
    pub fn project(&self, root: &Path) -> Project {
        let mut project = Project::new(root);
        project.id = self.project.id.clone();
        if let Some(name) = &self.project.name {
            project.name = name.clone();
        }
        project.phase = self.project.phase;
        project
    }

    /// Manifest path, resolved against `base_dir`.
    pub fn manifest_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.registry.manifest.as_ref().map(|p| base_dir.join(p))
    }

    /// Build the settings/issue store. Relative paths resolve against
    /// `base_dir` (the config file's directory).
    pub fn store(&self, base_dir: &Path) -> Result<MemoryStore> {
        let mut store = MemoryStore::new();

        for phase in &self.phases {
            store = store.with_phase(phase.clone());
        }

        for (key, matrix) in &self.matrix {
            store = store.with_matrix(parse_phase_key(key)?, matrix.clone());
        }

        for (key, value) in &self.settings {
            let value = match value {
                toml::Value::String(s) => s.clone(),
                other => serde_json::to_string(other).map_err(|e| Error::Config {
                    message: format!("setting {key}: {e}"),
                    path: None,
                })?,
            };
            store = store.with_setting(key.clone(), value);
        }

        if let Some(issues) = &self.project.issues {
            let path = base_dir.join(issues);
            let content = std::fs::read_to_string(&path).map_err(|e| Error::Io {
                path: path.clone(),
                source: e,
            })?;
            store = store.with_issues(parse_issue_export(&content)?);
        }

        Ok(store)
    }
}

fn parse_phase_key(key: &str) -> Result<PhaseId> {
    key.parse::<u8>()
        .map(PhaseId)
        .map_err(|_| Error::Config {
            message: format!("matrix key '{key}' is not a phase id"),
            path: None,
        })
}

fn config_error(path: &Path, message: impl Into<String>) -> Error {
    Error::Config {
        message: format!("{}: {}", path.display(), message.into()),
        path: Some(path.to_path_buf()),
    }
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "shipcheck: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Parse config, warning on unknown top-level keys.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let mut table: toml::Table =
        toml::from_str(content).map_err(|e| config_error(path, e.to_string()))?;

    let version = table
        .get("version")
        .ok_or_else(|| config_error(path, "missing required field: version"))?
        .as_integer()
        .ok_or_else(|| config_error(path, "version must be an integer"))?;

    if version != SUPPORTED_VERSION {
        return Err(config_error(
            path,
            format!(
                "unsupported config version {} (supported: {})\n  Upgrade shipcheck to use this config.",
                version, SUPPORTED_VERSION
            ),
        ));
    }

    let unknown: Vec<String> = table
        .keys()
        .filter(|k| !KNOWN_KEYS.contains(&k.as_str()))
        .cloned()
        .collect();
    for key in unknown {
        warn_unknown_key(path, &key);
        table.remove(&key);
    }

    let config: Config = toml::Value::Table(table)
        .try_into()
        .map_err(|e: toml::de::Error| config_error(path, e.to_string()))?;

    validate(&config).map_err(|message| config_error(path, message))?;
    Ok(config)
}

fn validate(config: &Config) -> std::result::Result<(), String> {
    if config.runner.workers == 0 {
        return Err("runner.workers must be at least 1".to_string());
    }
    for key in config.matrix.keys() {
        if key.parse::<u8>().is_err() {
            return Err(format!("matrix key '{key}' is not a phase id"));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
