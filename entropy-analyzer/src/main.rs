// entropy-analyzer/src/main.rs
//! entropy-analyzer entry point.
//!
//! Loads `.env`, configures logging and the theme, then runs the command.

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;

use entropy_analyzer::cli::Cli;
use entropy_analyzer::commands::error_msg;
use entropy_analyzer::logger;
use entropy_analyzer::ui::theme::{build_theme_map, ThemeStyle};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(log::LevelFilter::Off)
    } else if cli.debug {
        Some(log::LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    let theme = match build_theme_map(cli.theme.as_ref()).context("Theme error") {
        Ok(theme) => theme,
        Err(e) => {
            error_msg(format!("{:#}", e), &ThemeStyle::default_theme_map());
            return ExitCode::FAILURE;
        }
    };

    match entropy_analyzer::run(cli, &theme) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error_msg(format!("{:#}", e), &theme);
            ExitCode::FAILURE
        }
    }
}
