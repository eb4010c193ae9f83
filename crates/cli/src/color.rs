// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Color detection and terminal styling.
//!
//! Detection order:
//! 1. `--no-color` / `--color` flags
//! 2. NO_COLOR env var → no color
//! 3. COLOR env var → use color
//! 4. default: color only when stdout is a terminal outside CI

use std::io::IsTerminal;

use termcolor::ColorChoice;

/// Resolve the color choice from the command-line flags, then the environment.
pub fn choose(force: bool, disable: bool) -> ColorChoice {
    if disable {
        ColorChoice::Never
    } else if force {
        ColorChoice::Always
    } else {
        resolve_color()
    }
}

/// Resolve color choice from environment variables.
///
/// Per [no-color.org](https://no-color.org/), `NO_COLOR` when set to any value
/// (including empty string) disables color.
pub fn resolve_color() -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    if std::env::var_os("COLOR").is_some() {
        return ColorChoice::Always;
    }
    if !std::io::stdout().is_terminal() || std::env::var_os("CI").is_some() {
        return ColorChoice::Never;
    }
    ColorChoice::Auto
}

/// Color scheme for check output.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    use crate::check::Severity;

    /// Bold check name.
    pub fn check_name() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    /// Green "PASS" indicator.
    pub fn pass() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        spec
    }

    /// Status indicator of a failed result, colored by severity.
    pub fn failure(severity: Severity) -> ColorSpec {
        let mut spec = ColorSpec::new();
        let color = match severity {
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
            Severity::Info => Color::Cyan,
        };
        spec.set_fg(Some(color)).set_bold(true);
        spec
    }

    /// Dimmed secondary text (severity labels, decision reasons).
    pub fn muted() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        spec
    }

    /// Green "READY" verdict.
    pub fn ready() -> ColorSpec {
        pass()
    }

    /// Red "NOT READY" verdict.
    pub fn blocked() -> ColorSpec {
        failure(Severity::Error)
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
