// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Locating the shipcheck.toml that governs a project.
//!
//! The search climbs from the project directory and gives up at the first
//! directory holding `.git`, so a config in an enclosing checkout never
//! leaks into a nested repository.

use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE;
use crate::error::{Error, Result};

/// Nearest shipcheck.toml at or above `project_dir`, bounded by the
/// repository root.
pub fn find_config(project_dir: &Path) -> Option<PathBuf> {
    for dir in project_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.exists() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Config file for a run.
///
/// An explicit path (`-C/--config` or `SHIPCHECK_CONFIG`) must exist.
/// Without one, [`find_config`] searches from `project_dir`; `Ok(None)`
/// means the built-in defaults apply.
pub fn resolve_config(explicit: Option<&Path>, project_dir: &Path) -> Result<Option<PathBuf>> {
    let Some(path) = explicit else {
        return Ok(find_config(project_dir));
    };
    if !path.exists() {
        return Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path.to_path_buf()),
        });
    }
    Ok(Some(path.to_path_buf()))
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
