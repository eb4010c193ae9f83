// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for reports, the catalog and phase plans.

pub mod json;
pub mod text;

use serde_json::Value as JsonValue;

/// Render a detail value as display lines.
///
/// Lists become one line per element; strings print bare.
pub(crate) fn detail_lines(value: &JsonValue) -> Vec<String> {
    match value {
        JsonValue::Array(items) => items.iter().flat_map(detail_lines).collect(),
        JsonValue::String(s) => vec![s.clone()],
        JsonValue::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

/// Comma-separated phase ids.
pub(crate) fn phase_list(phases: &[crate::phase::PhaseId]) -> String {
    phases
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
