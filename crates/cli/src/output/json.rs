// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is buffered and written at the end (not streamed).

use std::io::Write;

use serde::Serialize;

use crate::catalog::CheckInfo;
use crate::check::CheckReport;

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a run report: timestamp, phase, summary and ordered results.
    pub fn write_report(&mut self, report: &CheckReport) -> std::io::Result<()> {
        self.write_value(report)
    }

    /// Write the catalog as an array of check descriptions.
    pub fn write_catalog(&mut self, infos: &[CheckInfo]) -> std::io::Result<()> {
        self.write_value(&infos)
    }

    fn write_value(&mut self, value: &impl Serialize) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
