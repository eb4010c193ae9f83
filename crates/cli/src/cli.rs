// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::check::Category;

/// Release-readiness checks for a project, selected by lifecycle phase
#[derive(Parser)]
#[command(name = "shipcheck")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "SHIPCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the checks of the project's phase
    Check(CheckArgs),
    /// List every registered check
    List(ListArgs),
    /// Show which checks a phase runs, and why
    Matrix(MatrixArgs),
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Project directory (default: current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Run the checks of this phase instead of the project's
    #[arg(long, value_name = "N")]
    pub phase: Option<u8>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Only list checks of this category
    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,
}

#[derive(clap::Args)]
pub struct MatrixArgs {
    /// Project directory (default: current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Phase to resolve instead of the project's
    #[arg(long, value_name = "N")]
    pub phase: Option<u8>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse()
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
