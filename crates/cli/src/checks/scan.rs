// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared file lookup and scanning for the text-based checks.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// README names probed in order.
pub const README_NAMES: &[&str] = &["README.md", "README.txt", "README", "README.rst"];

/// First of `names` that exists directly under `root`.
pub fn first_existing<'n>(root: &Path, names: &'n [String]) -> Option<&'n str> {
    names
        .iter()
        .map(String::as_str)
        .find(|name| root.join(name).exists())
}

/// The project's README, if any: (file name, contents).
pub fn read_readme(root: &Path) -> Option<(&'static str, String)> {
    README_NAMES.iter().find_map(|name| {
        let path = root.join(name);
        if path.is_file() {
            read_lossy(&path).map(|content| (*name, content))
        } else {
            None
        }
    })
}

/// Read a file as UTF-8, replacing invalid sequences.
pub fn read_lossy(path: &Path) -> Option<String> {
    std::fs::read(path)
        .ok()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

pub fn contains_any_char(content: &str, chars: &str) -> bool {
    content.chars().any(|c| chars.contains(c))
}

/// Python sources under `root`, sorted by path.
///
/// Directories named in `skip_dirs` (and `.git`) are not descended into.
/// At most `max_files` paths are returned.
pub fn python_files(root: &Path, skip_dirs: &[String], max_files: usize) -> Vec<PathBuf> {
    let skip: Vec<String> = skip_dirs.to_vec();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_path(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            name != ".git" && !skip.iter().any(|s| *s == name)
        })
        .build();

    walker
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "py"))
        .map(|entry| entry.into_path())
        .take(max_files)
        .collect()
}

/// `path` relative to `root`, for display.
pub fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
