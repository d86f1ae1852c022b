//! Shared terminal styling for store output

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.magenta} {msg} [{elapsed}]";

pub enum StyleType {
    Heading,
    Label,
    Amount,
    Alert,
    Muted,
}

pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Heading => style(text).magenta().bold(),
        StyleType::Label => style(text).bold(),
        StyleType::Amount => style(text).green().bold(),
        StyleType::Alert => style(text).red().bold(),
        StyleType::Muted => style(text).dim(),
    };
    styled.to_string()
}

/// Rounded table that wraps to the terminal width.
pub fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn heading_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Magenta)
        .add_attribute(Attribute::Bold)
}

pub fn price_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Stock count, red when running low.
pub fn stock_cell(stock: u32, low: bool) -> Cell {
    let cell = Cell::new(stock).set_alignment(CellAlignment::Right);
    if !low {
        return cell;
    }
    cell.fg(Color::Red).add_attribute(Attribute::Bold)
}

/// Spinner shown while waiting on the suggestion service. Hidden when stderr
/// is not a terminal.
pub fn new_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner().with_message(message.to_string());
    match ProgressStyle::with_template(SPINNER_TEMPLATE) {
        Ok(spinner_style) => spinner.set_style(spinner_style),
        Err(e) => tracing::debug!("Invalid spinner template: {}", e),
    }
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Horizontal rule as wide as the terminal.
pub fn print_rule() {
    let width = match Term::stdout().size_checked() {
        Some((_, columns)) => columns as usize,
        None => 80,
    };
    println!("\n{}", "─".repeat(width));
}
