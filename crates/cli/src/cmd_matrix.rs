// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Matrix command implementation.

use shipcheck::cli::{Cli, MatrixArgs};
use shipcheck::color::resolve_color;
use shipcheck::output::text::TextFormatter;
use shipcheck::session::Session;

/// Show, for every registered check, whether it runs in the phase and why.
pub fn run(cli: &Cli, args: &MatrixArgs) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let root = match &args.path {
        Some(path) => cwd.join(path),
        None => cwd,
    };

    let session = Session::load(&root, cli.config.as_deref())?;
    let phase = session.phase(args.phase)?;
    let plan = session.runner.plan(&session.registry, &session.store, phase)?;

    let mut formatter = TextFormatter::stdout(resolve_color());
    formatter.write_plan(&plan, session.phase_info(phase).as_ref())?;
    Ok(())
}
