// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command implementation.

use std::time::Instant;

use shipcheck::cli::{CheckArgs, Cli, OutputFormat};
use shipcheck::color;
use shipcheck::error::ExitCode;
use shipcheck::output::json::JsonFormatter;
use shipcheck::output::text::TextFormatter;
use shipcheck::session::Session;

/// Run the check command.
pub fn run(cli: &Cli, args: &CheckArgs) -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    let cwd = std::env::current_dir()?;

    // Relative paths resolve against the working directory
    let root = match &args.path {
        Some(path) => cwd.join(path),
        None => cwd,
    };
    if !root.is_dir() {
        return Err(shipcheck::Error::Argument(format!(
            "not a directory: {}",
            root.display()
        ))
        .into());
    }

    let session = Session::load(&root, cli.config.as_deref())?;
    let phase = session.phase(args.phase)?;
    tracing::trace!("check command starting in phase {phase}");

    let report = session.runner.report(
        &session.registry,
        &session.project,
        session.stores(),
        Some(phase),
    )?;
    tracing::debug!(
        "{} check(s) finished in {:?}",
        report.total,
        start.elapsed()
    );

    match args.output {
        OutputFormat::Text => {
            let choice = color::choose(args.color, args.no_color);
            TextFormatter::stdout(choice)
                .write_report(&report, session.phase_info(phase).as_ref())?;
        }
        OutputFormat::Json => JsonFormatter::new(std::io::stdout()).write_report(&report)?,
    }

    Ok(if report.ready {
        ExitCode::Success
    } else {
        ExitCode::CheckFailed
    })
}
