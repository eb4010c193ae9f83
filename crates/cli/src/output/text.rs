// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! Phase 4 (Final)
//! FAIL  LICENSE [error]: No LICENSE file found
//! PASS  README [error]: README.md found
//! SKIP  Ruff: Skipped (ruff not available)
//! PASS  Coverage [info]: Coverage 85% (good)
//!   <detail line>
//!
//! 2/3 checks passed: NOT READY (1 blocker)
//! ```


use termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};

use super::{detail_lines, phase_list};
use crate::catalog::CheckInfo;
use crate::check::{CheckReport, CheckResult};
use crate::color::scheme;
use crate::phase::{Phase, PhaseId};
use crate::runner::Plan;

/// Maximum detail lines shown per result.
pub const DETAIL_LIMIT: usize = 10;

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    out: W,
}

impl TextFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn stdout(color_choice: ColorChoice) -> Self {
        Self::new(StandardStream::stdout(color_choice))
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn styled(&mut self, spec: &ColorSpec, text: &str) -> std::io::Result<()> {
        self.out.set_color(spec)?;
        write!(self.out, "{text}")?;
        self.out.reset()
    }

    /// `Phase N (Display)` heading; the display name is omitted when unknown.
    pub fn write_phase_heading(
        &mut self,
        report_phase: PhaseId,
        phase: Option<&Phase>,
    ) -> std::io::Result<()> {
        let heading = match phase {
            Some(p) => format!("Phase {} ({})", report_phase, p.display_name),
            None => format!("Phase {report_phase}"),
        };
        self.styled(&scheme::check_name(), &heading)?;
        writeln!(self.out)
    }

    /// Write a single check result.
    pub fn write_check(&mut self, result: &CheckResult) -> std::io::Result<()> {
        let is_skip = result.is_skip();
        let (label, spec) = if !result.passed {
            ("FAIL", scheme::failure(result.severity))
        } else if is_skip {
            ("SKIP", scheme::muted())
        } else {
            ("PASS", scheme::pass())
        };
        self.styled(&spec, &format!("{label:<5}"))?;
        write!(self.out, " ")?;
        self.styled(&scheme::check_name(), &result.name)?;
        if !is_skip {
            write!(self.out, " ")?;
            self.styled(&scheme::muted(), &format!("[{}]", result.severity))?;
        }
        writeln!(self.out, ": {}", result.message)?;

        if !result.passed {
            let lines: Vec<String> = result.details.values().flat_map(detail_lines).collect();
            for line in lines.iter().take(DETAIL_LIMIT) {
                writeln!(self.out, "  {line}")?;
            }
            if lines.len() > DETAIL_LIMIT {
                writeln!(self.out, "  ... and {} more", lines.len() - DETAIL_LIMIT)?;
            }
        }
        Ok(())
    }

    /// Write the summary line.
    pub fn write_summary(&mut self, report: &CheckReport) -> std::io::Result<()> {
        writeln!(self.out)?;
        write!(
            self.out,
            "{}/{} check{} passed: ",
            report.passed,
            report.total,
            if report.total == 1 { "" } else { "s" }
        )?;
        if report.ready {
            self.styled(&scheme::ready(), "READY")?;
            writeln!(self.out)
        } else {
            let blockers = report.blockers().count();
            self.styled(&scheme::blocked(), "NOT READY")?;
            writeln!(
                self.out,
                " ({} blocker{})",
                blockers,
                if blockers == 1 { "" } else { "s" }
            )
        }
    }

    /// Write the whole report: heading, results, summary.
    pub fn write_report(
        &mut self,
        report: &CheckReport,
        phase: Option<&Phase>,
    ) -> std::io::Result<()> {
        self.write_phase_heading(report.phase, phase)?;
        for result in &report.checks {
            self.write_check(result)?;
        }
        self.write_summary(report)
    }

    /// Write the catalog grouped by category.
    pub fn write_catalog(&mut self, infos: &[CheckInfo]) -> std::io::Result<()> {
        let width = infos.iter().map(|i| i.name.len()).max().unwrap_or(0);
        let mut current = None;
        for info in infos {
            if current != Some(info.category) {
                if current.is_some() {
                    writeln!(self.out)?;
                }
                self.styled(&scheme::check_name(), &format!("{}:", info.category))?;
                writeln!(self.out)?;
                current = Some(info.category);
            }
            write!(self.out, "  {:<width$}  ", info.name)?;
            self.styled(
                &scheme::muted(),
                &format!("[{:<7}]", phase_list(&info.default_phases)),
            )?;
            writeln!(self.out, "  {}", info.description)?;
        }
        Ok(())
    }

    /// Write a phase plan: one line per registered check with the reason.
    pub fn write_plan(&mut self, plan: &Plan, phase: Option<&Phase>) -> std::io::Result<()> {
        self.write_phase_heading(plan.phase, phase)?;
        let width = plan
            .checks
            .iter()
            .map(|p| p.check.name().len())
            .max()
            .unwrap_or(0);
        for planned in &plan.checks {
            let (label, spec) = if planned.decision.runs() {
                ("run", scheme::pass())
            } else {
                ("skip", scheme::muted())
            };
            self.styled(&spec, &format!("{label:<5}"))?;
            write!(self.out, " {:<width$}  ", planned.check.name())?;
            self.styled(&scheme::muted(), &planned.decision.to_string())?;
            writeln!(self.out)?;
        }
        let selected = plan.selected().count();
        writeln!(self.out)?;
        writeln!(
            self.out,
            "{} of {} check{} selected",
            selected,
            plan.checks.len(),
            if plan.checks.len() == 1 { "" } else { "s" }
        )
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
