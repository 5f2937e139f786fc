// entropy-analyzer/src/ui/theme.rs
//! Module for managing the application's command-line interface (CLI) theme.
//!
//! Users can recolor each kind of output element with a small YAML file that
//! maps entries (`header`, `score_high`, ...) to one of the 16 named ANSI
//! colors. Entries missing from a custom file keep their default color.

use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Type alias for the theme map, providing a consistent type definition.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    /// Table headers and section titles.
    Header,
    Success,
    Info,
    Warn,
    Error,
    /// Strategy tokens in listings.
    StrategyName,
    /// Scores below 0.25.
    ScoreLow,
    /// Scores in [0.25, 0.5).
    ScoreModerate,
    /// Scores in [0.5, 0.75).
    ScoreHigh,
    /// Scores of 0.75 and above.
    ScoreCritical,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 10] = [
        ThemeEntry::Header,
        ThemeEntry::Success,
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::StrategyName,
        ThemeEntry::ScoreLow,
        ThemeEntry::ScoreModerate,
        ThemeEntry::ScoreHigh,
        ThemeEntry::ScoreCritical,
    ];

    /// The score band a value in `[0, 1]` falls into.
    pub fn for_score(score: f64) -> ThemeEntry {
        if score < 0.25 {
            ThemeEntry::ScoreLow
        } else if score < 0.5 {
            ThemeEntry::ScoreModerate
        } else if score < 0.75 {
            ThemeEntry::ScoreHigh
        } else {
            ThemeEntry::ScoreCritical
        }
    }
}

/// Represents an ANSI color that can be used in the theme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// A named ANSI color (e.g., "red", "brightgreen").
    Named(String),
}

/// The 16 ANSI color names a theme may use, matched case-insensitively.
const NAMED_COLORS: [(&str, AnsiColors); 16] = [
    ("black", AnsiColors::Black),
    ("red", AnsiColors::Red),
    ("green", AnsiColors::Green),
    ("yellow", AnsiColors::Yellow),
    ("blue", AnsiColors::Blue),
    ("magenta", AnsiColors::Magenta),
    ("cyan", AnsiColors::Cyan),
    ("white", AnsiColors::White),
    ("brightblack", AnsiColors::BrightBlack),
    ("brightred", AnsiColors::BrightRed),
    ("brightgreen", AnsiColors::BrightGreen),
    ("brightyellow", AnsiColors::BrightYellow),
    ("brightblue", AnsiColors::BrightBlue),
    ("brightmagenta", AnsiColors::BrightMagenta),
    ("brightcyan", AnsiColors::BrightCyan),
    ("brightwhite", AnsiColors::BrightWhite),
];

fn lookup_color(name: &str) -> Option<AnsiColors> {
    NAMED_COLORS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, color)| *color)
}

/// Returned when a theme names a color outside [`NAMED_COLORS`].
#[derive(Debug, Clone, Error)]
#[error("unknown theme color '{0}' (use one of the 16 ANSI names, e.g. red, brightblue)")]
pub struct ParseThemeColorError(pub String);

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match lookup_color(s) {
            Some(_) => Ok(ThemeColor::Named(s.to_ascii_lowercase())),
            None => Err(ParseThemeColorError(s.to_string())),
        }
    }
}

impl ThemeColor {
    fn named(name: &str) -> Self {
        ThemeColor::Named(name.to_string())
    }

    /// The terminal color for this name. Unrecognized names render white.
    pub fn to_ansi_color(&self) -> AnsiColors {
        match self {
            ThemeColor::Named(name) => lookup_color(name).unwrap_or(AnsiColors::White),
        }
    }
}

/// Represents the style configuration for a specific `ThemeEntry`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    /// An optional `ThemeColor` to apply as the foreground color.
    pub fg: Option<ThemeColor>,
}

/// Loads a theme configuration from a YAML file or returns the default theme.
pub fn build_theme_map(theme_path: Option<&PathBuf>) -> Result<ThemeMap> {
    match theme_path {
        Some(path) => ThemeStyle::load_from_file(path),
        None => Ok(ThemeStyle::default_theme_map()),
    }
}

impl ThemeStyle {
    fn fg(name: &str) -> Self {
        ThemeStyle { fg: Some(ThemeColor::named(name)) }
    }

    /// Loads a theme from a YAML file on disk, filling gaps from the default theme.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let mut custom: ThemeMap = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

        for (entry, style) in &custom {
            if let Some(ThemeColor::Named(name)) = &style.fg {
                name.parse::<ThemeColor>()
                    .with_context(|| format!("Invalid color for '{:?}' in theme file {}", entry, path.display()))?;
            }
        }

        for (entry, style) in Self::default_theme_map() {
            custom.entry(entry).or_insert(style);
        }
        Ok(custom)
    }

    /// Returns a default theme map with predefined color mappings.
    pub fn default_theme_map() -> ThemeMap {
        let mut default_theme = HashMap::new();
        default_theme.insert(ThemeEntry::Header, Self::fg("cyan"));
        default_theme.insert(ThemeEntry::Success, Self::fg("green"));
        default_theme.insert(ThemeEntry::Info, Self::fg("white"));
        default_theme.insert(ThemeEntry::Warn, Self::fg("yellow"));
        default_theme.insert(ThemeEntry::Error, Self::fg("red"));
        default_theme.insert(ThemeEntry::StrategyName, Self::fg("brightblue"));

        default_theme.insert(ThemeEntry::ScoreLow, Self::fg("brightblack"));
        default_theme.insert(ThemeEntry::ScoreModerate, Self::fg("yellow"));
        default_theme.insert(ThemeEntry::ScoreHigh, Self::fg("red"));
        default_theme.insert(ThemeEntry::ScoreCritical, Self::fg("brightred"));
        default_theme
    }
}
