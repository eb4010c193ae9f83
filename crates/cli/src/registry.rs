// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Name-keyed catalog of available checks.
//!
//! Checks come from [`CheckSource`]s: the built-in table and, optionally, a
//! project manifest. Sources are loaded once, on first lookup, unless
//! discovery is forced.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use crate::check::{Category, Check};
use crate::checks::builtin_checks;

/// A provider of checks.
pub trait CheckSource: Send + Sync {
    /// Label used in logs.
    fn name(&self) -> &str;

    fn load(&self) -> anyhow::Result<Vec<Arc<dyn Check>>>;
}

/// The compile-time table of built-in checks.
pub struct BuiltinSource;

impl CheckSource for BuiltinSource {
    fn name(&self) -> &str {
        "builtin"
    }

    fn load(&self) -> anyhow::Result<Vec<Arc<dyn Check>>> {
        Ok(builtin_checks())
    }
}

#[derive(Default)]
struct State {
    sources: Vec<Arc<dyn CheckSource>>,
    checks: BTreeMap<String, Arc<dyn Check>>,
    discovered: bool,
}

impl State {
    fn insert(&mut self, check: Arc<dyn Check>) -> bool {
        self.checks
            .insert(check.name().to_string(), check)
            .is_some()
    }

    fn discover(&mut self) {
        for source in &self.sources {
            match source.load() {
                Ok(checks) => {
                    tracing::debug!("{}: {} check(s)", source.name(), checks.len());
                    for check in checks {
                        let name = check.name().to_string();
                        if self.checks.insert(name.clone(), check).is_some() {
                            tracing::debug!("{}: replaced check {name}", source.name());
                        }
                    }
                }
                Err(e) => tracing::warn!("check source {} failed: {e:#}", source.name()),
            }
        }
        self.discovered = true;
    }
}

/// Registry of checks, keyed by unique name.
///
/// All state sits behind one mutex, so concurrent first lookups discover
/// exactly once.
pub struct CheckRegistry {
    state: Mutex<State>,
}

static GLOBAL: LazyLock<CheckRegistry> = LazyLock::new(CheckRegistry::new);

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckRegistry {
    /// Registry backed by the built-in checks.
    pub fn new() -> Self {
        Self::empty().with_source(BuiltinSource)
    }

    /// Registry with no sources at all.
    pub fn empty() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    /// Process-wide registry.
    pub fn global() -> &'static CheckRegistry {
        &GLOBAL
    }

    pub fn with_source(self, source: impl CheckSource + 'static) -> Self {
        self.add_source(Arc::new(source));
        self
    }

    /// Add a source. Takes effect at the next (or a forced) discovery.
    pub fn add_source(&self, source: Arc<dyn CheckSource>) {
        self.lock().sources.push(source);
    }

    /// Insert a check; an existing check with the same name is replaced.
    pub fn register(&self, check: Arc<dyn Check>) {
        let name = check.name().to_string();
        if self.lock().insert(check) {
            tracing::debug!("re-registered check {name}");
        }
    }

    /// Load all sources. A no-op after the first call unless `force`.
    pub fn discover(&self, force: bool) {
        let mut state = self.lock();
        if state.discovered && !force {
            return;
        }
        state.discover();
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Check>> {
        self.discovered().checks.get(name).cloned()
    }

    /// All checks, ordered by name.
    pub fn get_all(&self) -> Vec<Arc<dyn Check>> {
        self.discovered().checks.values().cloned().collect()
    }

    pub fn get_by_category(&self, category: Category) -> Vec<Arc<dyn Check>> {
        self.discovered()
            .checks
            .values()
            .filter(|c| c.category() == category)
            .cloned()
            .collect()
    }

    /// Forget every check and mark the registry undiscovered.
    /// Sources are kept.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.checks.clear();
        state.discovered = false;
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn discovered(&self) -> MutexGuard<'_, State> {
        let mut state = self.lock();
        if !state.discovered {
            state.discover();
        }
        state
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
