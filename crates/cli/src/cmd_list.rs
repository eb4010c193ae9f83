// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! List command implementation.

use shipcheck::catalog::get_all_checks;
use shipcheck::cli::{Cli, ListArgs, OutputFormat};
use shipcheck::color::resolve_color;
use shipcheck::output::json::JsonFormatter;
use shipcheck::output::text::TextFormatter;
use shipcheck::session::Session;

/// Print the catalog: builtin checks plus the project's manifest checks.
pub fn run(cli: &Cli, args: &ListArgs) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let session = Session::load(&cwd, cli.config.as_deref())?;

    let mut infos = get_all_checks(&session.registry);
    if let Some(category) = args.category {
        infos.retain(|info| info.category == category);
    }
    tracing::debug!("listing {} check(s)", infos.len());

    match args.output {
        OutputFormat::Text => TextFormatter::stdout(resolve_color()).write_catalog(&infos)?,
        OutputFormat::Json => JsonFormatter::new(std::io::stdout()).write_catalog(&infos)?,
    }
    Ok(())
}
