// entropy-analyzer/src/commands/strategies.rs
//! The `strategies` command: a table of every strategy token.

use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use entropy_analyzer_core::EntropyFactory;
use is_terminal::IsTerminal;
use std::io::{self, Write};

use crate::ui::output_format::paint;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Renders the strategy table. Colors are applied only when `enable_colors` is set.
pub fn render_table(theme: &ThemeMap, enable_colors: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            ["Token", "Input", "Description"]
                .map(|h| paint(h, ThemeEntry::Header, theme, enable_colors)),
        );

    for kind in EntropyFactory::kinds() {
        table.add_row(vec![
            paint(kind.as_str(), ThemeEntry::StrategyName, theme, enable_colors),
            kind.input_shape().to_string(),
            kind.description().to_string(),
        ]);
    }
    table
}

/// Runs the `strategies` command.
pub fn run_strategies(theme: &ThemeMap) -> Result<()> {
    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut writer = stdout.lock();
    writeln!(writer, "{}", render_table(theme, supports_color))?;
    Ok(())
}
