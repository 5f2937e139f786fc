// entropy-analyzer/src/lib.rs
//! # Entropy Analyzer CLI
//!
//! Command-line front end for `entropy-analyzer-core`. The binary parses
//! arguments with [`cli::Cli`] and hands them to [`run`], which dispatches to
//! the command modules.
//! License: MIT OR APACHE 2.0

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::ui::theme::ThemeMap;

/// Executes the parsed command line.
pub fn run(cli: Cli, theme: &ThemeMap) -> Result<()> {
    match cli.command {
        Commands::Score(opts) => commands::score::run_score(opts, cli.quiet, cli.debug, theme),
        Commands::Strategies => commands::strategies::run_strategies(theme),
    }
}
