// entropy-analyzer/src/commands/score.rs
//! The `score` command: reads one input, scores it with the requested strategy
//! and prints the result.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use entropy_analyzer_core::{
    merge_config, AnalyzerConfig, Datum, EntropyFactory, EntropyRequest, EntropyWorkflow, StrategyKind, Workflow,
};
use is_terminal::IsTerminal;
use log::debug;
use std::io::{self, Read, Write};
use std::path::Path;

use super::{info_msg, warn_msg};
use crate::cli::{InputFormat, ScoreCommand};
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Builds the effective configuration: embedded defaults overlaid with an
/// explicit `--config` file, or with the first discovered user file.
pub fn resolve_config(explicit: Option<&Path>) -> Result<AnalyzerConfig> {
    let defaults = AnalyzerConfig::load_default()?;
    let user = match explicit {
        Some(path) => Some(AnalyzerConfig::load_from_file(path)?),
        None => AnalyzerConfig::discover()?,
    };
    Ok(merge_config(defaults, user))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input from {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read input from stdin")?;
            Ok(buffer)
        }
    }
}

fn strip_trailing_newline(raw: &str) -> &str {
    raw.strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .unwrap_or(raw)
}

fn parse_number_token(token: &str) -> Datum {
    if let Ok(i) = token.parse::<i64>() {
        Datum::Int(i)
    } else if let Ok(f) = token.parse::<f64>() {
        Datum::Float(f)
    } else {
        Datum::Text(token.to_string())
    }
}

/// Turns raw input into the value handed to a strategy.
///
/// With [`InputFormat::Json`] the whole input is one JSON document; empty input
/// is absent. With [`InputFormat::Auto`] the layout depends on the strategy:
/// text strategies take the input verbatim (minus one trailing newline),
/// `numerical` takes whitespace- or comma-separated numbers and the list
/// strategies take one entry per non-blank line. A list strategy whose input
/// starts with `[` is read as JSON either way.
pub fn parse_input(kind: StrategyKind, raw: &str, format: InputFormat) -> Result<Option<Datum>> {
    let trimmed = raw.trim();
    let as_json = match format {
        InputFormat::Json => true,
        InputFormat::Auto => {
            matches!(kind, StrategyKind::Numerical | StrategyKind::Search | StrategyKind::Time) && trimmed.starts_with('[')
        }
    };

    if as_json {
        if trimmed.is_empty() {
            return Ok(None);
        }
        let datum = Datum::from_json(trimmed).context("Input is not valid JSON")?;
        return Ok(Some(datum));
    }

    let datum = match kind {
        StrategyKind::Text | StrategyKind::Contextual => Datum::Text(strip_trailing_newline(raw).to_string()),
        StrategyKind::Numerical => Datum::List(
            trimmed
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty())
                .map(parse_number_token)
                .collect(),
        ),
        StrategyKind::Search | StrategyKind::Time => Datum::List(
            raw.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(|l| Datum::Text(l.to_string()))
                .collect(),
        ),
    };
    Ok(Some(datum))
}

/// Runs the `score` command.
pub fn run_score(opts: ScoreCommand, quiet: bool, debug: bool, theme: &ThemeMap) -> Result<()> {
    let config = resolve_config(opts.config.as_deref())?;

    // An unknown token is reported before any input is read.
    let kind: StrategyKind = opts.strategy.parse()?;

    if kind == StrategyKind::Contextual && !quiet && std::env::var_os(config.judge.api_key_env()).is_none() {
        warn_msg(
            format!(
                "{} is not set; contextual scores fall back to character entropy.",
                config.judge.api_key_env()
            ),
            theme,
        );
    }

    let raw = read_input(opts.input_file.as_deref())?;
    let data = parse_input(kind, &raw, opts.input_format)?;
    debug!("Parsed input for '{}': {:?}", kind, data);

    let workflow = EntropyWorkflow::with_id(opts.workflow_id, EntropyFactory::from_config(&config)).with_verbose(debug);
    let report = workflow.run(EntropyRequest::new(kind.as_str(), data))?;

    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut writer = stdout.lock();
    if opts.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        output_format::print_score(&mut writer, report.score, theme, supports_color)?;
    }
    writer.flush()?;

    if !quiet {
        info_msg(
            format!("Scored with '{}' (workflow {}).", report.strategy, report.workflow_id),
            theme,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_text_keeps_inner_whitespace() {
        let datum = parse_input(StrategyKind::Text, "  a b \n", InputFormat::Auto).unwrap();
        assert_eq!(datum, Some(Datum::from("  a b ")));
    }

    #[test]
    fn auto_numbers_split_on_commas_and_whitespace() {
        let datum = parse_input(StrategyKind::Numerical, "1, 2.5\n3", InputFormat::Auto).unwrap();
        assert_eq!(
            datum,
            Some(Datum::List(vec![Datum::Int(1), Datum::Float(2.5), Datum::Int(3)]))
        );
    }

    #[test]
    fn auto_number_garbage_stays_text() {
        let datum = parse_input(StrategyKind::Numerical, "1 x", InputFormat::Auto).unwrap();
        assert_eq!(datum, Some(Datum::List(vec![Datum::Int(1), Datum::from("x")])));
    }

    #[test]
    fn auto_lines_for_list_strategies() {
        let datum = parse_input(StrategyKind::Time, "2024-01-01T00:00:00Z\n\n2024-01-01T00:01:00Z\n", InputFormat::Auto).unwrap();
        assert_eq!(
            datum,
            Some(Datum::from(vec!["2024-01-01T00:00:00Z", "2024-01-01T00:01:00Z"]))
        );
    }

    #[test]
    fn bracketed_list_input_is_json() {
        let datum = parse_input(StrategyKind::Search, r#"["a", "b"]"#, InputFormat::Auto).unwrap();
        assert_eq!(datum, Some(Datum::from(vec!["a", "b"])));
    }

    #[test]
    fn json_format() {
        assert_eq!(parse_input(StrategyKind::Text, "", InputFormat::Json).unwrap(), None);
        assert_eq!(
            parse_input(StrategyKind::Text, "null", InputFormat::Json).unwrap(),
            Some(Datum::Null)
        );
        assert!(parse_input(StrategyKind::Text, "{oops", InputFormat::Json).is_err());
    }
}
