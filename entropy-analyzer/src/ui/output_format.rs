// entropy-analyzer/src/ui/output_format.rs
//! Themed message and score printing.
//!
//! Every helper takes a writer and an `enable_colors` flag so callers decide
//! whether the target is a terminal.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use super::theme::{ThemeEntry, ThemeMap};

/// Colors `text` with the theme's foreground for `entry`, or returns it unchanged.
pub fn paint(text: &str, entry: ThemeEntry, theme: &ThemeMap, enable_colors: bool) -> String {
    if !enable_colors {
        return text.to_string();
    }
    match theme.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) => text.color(color.to_ansi_color()).to_string(),
        None => text.to_string(),
    }
}

fn print_prefixed<W: Write>(
    writer: &mut W,
    prefix: &str,
    message: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", paint(&format!("{}{}", prefix, message), entry, theme, enable_colors))
}

pub fn print_info_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "", message, ThemeEntry::Info, theme, enable_colors)
}

pub fn print_warn_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "Warning: ", message, ThemeEntry::Warn, theme, enable_colors)
}

pub fn print_error_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "Error: ", message, ThemeEntry::Error, theme, enable_colors)
}

/// Writes a score with six decimals, colored by its band.
pub fn print_score<W: Write>(writer: &mut W, score: f64, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    let text = format!("{:.6}", score);
    writeln!(writer, "{}", paint(&text, ThemeEntry::for_score(score), theme, enable_colors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn plain_output_has_no_escapes() {
        let theme = ThemeStyle::default_theme_map();
        let mut out = Vec::new();
        print_error_message(&mut out, "bad input", &theme, false).unwrap();
        print_score(&mut out, 0.5, &theme, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Error: bad input\n0.500000\n");
    }

    #[test]
    fn colored_output_wraps_text() {
        let theme = ThemeStyle::default_theme_map();
        let painted = paint("x", ThemeEntry::Error, &theme, true);
        assert!(painted.contains("\u{1b}["));
        assert!(painted.contains('x'));
    }
}
