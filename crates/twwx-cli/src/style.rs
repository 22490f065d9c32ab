//! Visual styling utilities for the CLI.
//!
//! Temperatures are coloured with the [`TemperatureBand`] scale; status
//! lines use the `[OK]`/`[!!]` prefixes.

use owo_colors::OwoColorize;
use twwx_types::TemperatureBand;

use crate::cli::StyleMode;

/// Format a temperature coloured by its band.
pub fn format_temp_colored(celsius: f64, no_color: bool) -> String {
    let formatted = format!("{:.1}", celsius);
    if no_color {
        return formatted;
    }

    let (r, g, b) = TemperatureBand::of(celsius).rgb();
    format!("{}", formatted.truecolor(r, g, b))
}

/// Format an optional temperature, with `-` for a missing value.
pub fn format_optional_temp(celsius: Option<f64>, no_color: bool) -> String {
    match celsius {
        Some(c) => format_temp_colored(c, no_color),
        None => "-".to_string(),
    }
}

/// Colour swatch for a band, as used by the legend.
pub fn band_swatch(band: TemperatureBand, no_color: bool) -> String {
    if no_color {
        return "   ".to_string();
    }
    let (r, g, b) = band.rgb();
    format!("{}", "   ".on_truecolor(r, g, b))
}

/// Format a success message.
pub fn format_success(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[OK] {}", message)
    } else {
        format!("{} {}", "[OK]".green(), message)
    }
}

/// Format a warning message.
pub fn format_warning(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[!!] {}", message)
    } else {
        format!("{} {}", "[!!]".yellow(), message)
    }
}

/// Format a title header.
pub fn format_title(title: &str, no_color: bool) -> String {
    let width = title.chars().count();
    if no_color {
        format!("{}\n{}", title, "━".repeat(width))
    } else {
        format!("{}\n{}", title.bold(), "━".repeat(width).dimmed())
    }
}

/// Get terminal width, defaulting to 80 if detection fails.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Apply the table style for the given mode.
pub fn apply_table_style(table: &mut tabled::Table, style: StyleMode) {
    use tabled::settings::Style;
    match style {
        StyleMode::Rich => {
            table.with(Style::rounded());
        }
        StyleMode::Plain => {
            table.with(Style::blank());
        }
    }
}
