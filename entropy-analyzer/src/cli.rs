// entropy-analyzer/src/cli.rs
//! This file defines the command-line interface (CLI) for the entropy-analyzer
//! application, including all available commands and their arguments.
//! License: MIT OR APACHE 2.0

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "entropy-analyzer",
    author = "Entropy Analyzer Contributors",
    version = env!("CARGO_PKG_VERSION"),
    about = "Score how unpredictable a piece of data is",
    long_about = "entropy-analyzer scores text, lists of numbers, sets of search results and timestamp sequences on a 0.0 (fully predictable) to 1.0 (maximally unpredictable) scale, using the strategy you name.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `entropy-analyzer` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scores an input file or stdin with one strategy.
    #[command(about = "Scores an input file or stdin with one strategy.")]
    Score(ScoreCommand),

    /// Lists the available strategies.
    #[command(about = "Lists the available strategies and the input each expects.")]
    Strategies,
}

/// Arguments for the `score` command.
#[derive(Parser, Debug)]
pub struct ScoreCommand {
    /// Strategy token: text, numerical, search, contextual or time.
    #[arg(long, short = 's', value_name = "STRATEGY", help = "Strategy to score with (see `entropy-analyzer strategies`).")]
    pub strategy: String,

    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Path to a custom configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// How to interpret the input.
    #[arg(long = "input-format", value_name = "FORMAT", default_value = "auto", help = "How to read the input: 'auto' picks a layout per strategy, 'json' parses a JSON document.")]
    pub input_format: InputFormat,

    /// Print the full report as JSON.
    #[arg(long = "json", help = "Print the full report (workflow id, strategy, score) as JSON.")]
    pub json: bool,

    /// Identifier recorded in the report; a UUID is generated when omitted.
    #[arg(long = "workflow-id", value_name = "ID", help = "Identifier recorded in the report (defaults to a fresh UUID).")]
    pub workflow_id: Option<String>,
}

/// Enum for selecting how the input is read.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Raw text for text strategies, whitespace/comma separated numbers, one entry per line for lists.
    #[default]
    Auto,
    /// A JSON document (string, array, or null).
    Json,
}
