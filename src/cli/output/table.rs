//! Table output for navigation traces using comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::{DesiredRoute, Screen};

/// Table formatter for CLI output
pub struct TableFormatter {
    use_colors: bool,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableFormatter {
    /// Formatter honouring `NO_COLOR`.
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
        }
    }

    /// Formatter with colours forced on or off.
    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// One row per route the app showed, in order.
    pub fn format_trail(&self, trail: &[DesiredRoute]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Screen").add_attribute(Attribute::Bold),
            Cell::new("Args").add_attribute(Attribute::Bold),
        ]);

        for (step, route) in trail.iter().enumerate() {
            let screen = if self.use_colors {
                Cell::new(route.path.as_str()).fg(screen_color(route.path))
            } else {
                Cell::new(route.path.as_str())
            };
            let args = match &route.args {
                Some(args) => truncate_text(&args.to_string(), 60),
                None => "-".to_string(),
            };
            table.add_row(vec![Cell::new(step), screen, Cell::new(args)]);
        }
        table.to_string()
    }

    /// Two-column key/value table.
    pub fn format_fields(&self, fields: &[(&str, String)]) -> String {
        let mut table = self.create_base_table();
        for (key, value) in fields {
            table.add_row(vec![
                Cell::new(key).add_attribute(Attribute::Bold),
                Cell::new(value),
            ]);
        }
        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }
}

fn screen_color(screen: Screen) -> Color {
    match screen {
        Screen::Loading => Color::DarkGrey,
        Screen::Login | Screen::Register => Color::Yellow,
        Screen::Home => Color::Green,
        Screen::NewsView | Screen::AuthorView => Color::Cyan,
        Screen::MyProfile | Screen::About => Color::White,
    }
}

fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Colors are disabled by `NO_COLOR` (https://no-color.org)
fn supports_color() -> bool {
    env::var_os("NO_COLOR").is_none()
}
