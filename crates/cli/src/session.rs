// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Everything a command needs to run checks against one project.

use std::path::{Path, PathBuf};

use crate::checks::custom::ManifestSource;
use crate::config::{self, Config};
use crate::discovery;
use crate::error::{Error, Result};
use crate::phase::{Phase, PhaseId};
use crate::project::Project;
use crate::registry::CheckRegistry;
use crate::runner::{CheckRunner, Stores};
use crate::store::{MemoryStore, SettingsStore};

/// A loaded project: config, stores, registry and runner.
pub struct Session {
    pub root: PathBuf,
    /// Config file in use, if any.
    pub config_path: Option<PathBuf>,
    pub config: Config,
    pub store: MemoryStore,
    pub project: Project,
    pub registry: CheckRegistry,
    pub runner: CheckRunner,
}

impl Session {
    /// Load the project at `root`.
    ///
    /// `explicit_config` comes from `-C/--config`; otherwise the config is
    /// discovered from `root` upward. Without a config file the defaults
    /// apply (builtin phases, seed matrix, no issues).
    pub fn load(root: &Path, explicit_config: Option<&Path>) -> Result<Self> {
        let config_path = discovery::resolve_config(explicit_config, root)?;
        let config = match &config_path {
            Some(path) => {
                tracing::debug!("loading config from {}", path.display());
                config::load(path)?
            }
            None => {
                tracing::debug!("no config found, using defaults");
                Config::default()
            }
        };

        // Relative paths in the config resolve against its directory.
        let base_dir = config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(root)
            .to_path_buf();

        let store = config.store(&base_dir)?;
        let project = config.project(root);
        let registry = match config.manifest_path(&base_dir) {
            Some(manifest) => CheckRegistry::new().with_source(ManifestSource::new(manifest)),
            None => CheckRegistry::new(),
        };
        let runner = CheckRunner::new(config.runner_config());

        Ok(Self {
            root: root.to_path_buf(),
            config_path,
            config,
            store,
            project,
            registry,
            runner,
        })
    }

    /// Resolve the phase to use: `--phase` if given (must be known),
    /// else the project's phase, else the runner default.
    pub fn phase(&self, requested: Option<u8>) -> Result<PhaseId> {
        let requested = requested.map(PhaseId);
        if let Some(id) = requested
            && self.store.phase(id).is_none()
        {
            return Err(Error::Argument(format!("unknown phase {id}")));
        }
        Ok(self.runner.effective_phase(&self.project, requested))
    }

    /// Phase definition for display.
    pub fn phase_info(&self, id: PhaseId) -> Option<Phase> {
        self.store.phase(id)
    }

    pub fn stores(&self) -> Stores<'_> {
        Stores {
            settings: &self.store,
            issues: Some(&self.store),
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
