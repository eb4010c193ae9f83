// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Git working tree inspection.
//!
//! Uses git2 (libgit2) so no `git` binary is needed at check time.

use std::path::Path;

use anyhow::Context;
use git2::{Repository, Status, StatusOptions};

/// Paths with uncommitted changes, in `git status --porcelain` terms.
///
/// Untracked files count; ignored files don't. An untracked directory is
/// reported once, not per file. Returns `None` outside a repository.
pub fn uncommitted_changes(root: &Path) -> anyhow::Result<Option<Vec<String>>> {
    let Ok(repo) = Repository::discover(root) else {
        return Ok(None);
    };

    let mut opts = StatusOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(false)
        .include_ignored(false);

    let statuses = repo
        .statuses(Some(&mut opts))
        .context("failed to read git status")?;

    let changes = statuses
        .iter()
        .filter(|entry| entry.status() != Status::CURRENT && !entry.status().is_ignored())
        .map(|entry| entry.path().unwrap_or("<non-utf8 path>").to_string())
        .collect();

    Ok(Some(changes))
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
