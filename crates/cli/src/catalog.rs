// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only descriptions of the registered checks.

use serde::Serialize;

use crate::check::{Category, Params};
use crate::phase::PhaseId;
use crate::registry::CheckRegistry;

/// Metadata of one check, as shown by `shipcheck list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckInfo {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub default_phases: Vec<PhaseId>,
    /// Default parameters.
    pub params: Params,
}

/// Describe every check in `registry`, ordered by (category, name).
pub fn get_all_checks(registry: &CheckRegistry) -> Vec<CheckInfo> {
    let mut infos: Vec<CheckInfo> = registry
        .get_all()
        .iter()
        .map(|check| CheckInfo {
            name: check.name().to_string(),
            description: check.description().to_string(),
            category: check.category(),
            default_phases: check.default_phases().to_vec(),
            params: check.default_params(),
        })
        .collect();
    infos.sort_by(|a, b| {
        a.category
            .as_str()
            .cmp(b.category.as_str())
            .then_with(|| a.name.cmp(&b.name))
    });
    infos
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
