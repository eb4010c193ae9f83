// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the cli crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use crate::check::{Check, CheckContext, CheckResult, ConfiguredCheck, Params};
use crate::phase::PhaseId;
use crate::project::Project;
use crate::store::MemoryStore;

/// Creates a temp directory with a minimal shipcheck.toml.
pub fn temp_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("shipcheck.toml"), "version = 1\n").unwrap();
    dir
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
///
/// # Example
///
/// ```ignore
/// let tmp = tempfile::tempdir().unwrap();
/// create_tree(tmp.path(), &[
///     ("README.md", "# Demo"),
///     ("src/app.py", "print('hi')"),
/// ]);
/// ```
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// Initialize a git repository at `root` and commit `files` to it.
pub fn init_git_repo(root: &Path, files: &[(&str, &str)]) -> git2::Repository {
    let repo = git2::Repository::init(root).unwrap();
    create_tree(root, files);

    {
        let mut index = repo.index().unwrap();
        for (path, _) in files {
            index.add_path(Path::new(path)).unwrap();
        }
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = git2::Signature::now("Test User", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
    }
    repo
}

/// Install an executable shell script at `.venv/bin/<name>`.
#[cfg(unix)]
pub fn fake_tool(root: &Path, name: &str, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = root.join(".venv").join("bin").join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// A throwaway project directory plus the stores a check reads from.
pub struct Fixture {
    pub dir: TempDir,
    pub project: Project,
    pub store: MemoryStore,
    pub phase: PhaseId,
    /// Whether checks see the issue store.
    pub with_issues: bool,
}

impl Fixture {
    pub fn new(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        create_tree(dir.path(), files);
        let project = Project::new(dir.path()).with_id("p1");
        Self {
            dir,
            project,
            store: MemoryStore::new(),
            phase: PhaseId::FINAL,
            with_issues: true,
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Run a check with its default params.
    pub fn run(&self, check: impl Check + 'static) -> CheckResult {
        self.run_with(check, Params::new())
    }

    /// Run a check with param overrides; panics if the check errors.
    pub fn run_with(&self, check: impl Check + 'static, overrides: Params) -> CheckResult {
        self.try_run(check, overrides).unwrap()
    }

    pub fn try_run(
        &self,
        check: impl Check + 'static,
        overrides: Params,
    ) -> anyhow::Result<CheckResult> {
        let mut instance = ConfiguredCheck::new(Arc::new(check));
        instance.configure(&overrides);
        let ctx = CheckContext {
            root: self.dir.path(),
            project: &self.project,
            phase: self.phase,
            settings: &self.store,
            issues: if self.with_issues {
                Some(&self.store)
            } else {
                None
            },
        };
        instance.run(&ctx)
    }
}
