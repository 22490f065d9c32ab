//! Output formatting utilities for text and JSON output.
//!
//! CSV output goes through [`twwx_store::Store::export_csv`].

use anyhow::Result;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use twwx_core::PipelineSummary;
use twwx_store::{StoreStats, StoredRecord};
use twwx_types::TemperatureBand;

use crate::cli::StyleMode;
use crate::style;

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
    /// Visual styling mode.
    pub style: StyleMode,
}

impl FormatOptions {
    pub fn new(no_color: bool, style: StyleMode) -> Self {
        // Plain mode automatically disables colors for pipe-friendliness
        Self {
            no_color: no_color || style == StyleMode::Plain,
            compact: false,
            style,
        }
    }

    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Serialize value to JSON string, respecting compact option.
    pub fn as_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(json + "\n")
    }
}

fn format_timestamp(ts: time::OffsetDateTime, compact: bool) -> String {
    if compact {
        ts.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
            .unwrap_or_else(|_| "Unknown".to_string())
    } else {
        ts.format(&Rfc3339)
            .unwrap_or_else(|_| "Unknown".to_string())
    }
}

/// Render records as a table.
///
/// The temperature column shows the current reading, or the min/max
/// midpoint when there is none.
#[must_use]
pub fn format_records_text(title: &str, records: &[StoredRecord], opts: &FormatOptions) -> String {
    use tabled::builder::Builder;

    if records.is_empty() {
        return "No weather records found.\n".to_string();
    }

    let compact_ts = style::terminal_width() < 120;

    let mut output = style::format_title(&format!("{} ({} records)", title, records.len()), opts.no_color);
    output.push_str("\n\n");

    let mut builder = Builder::default();
    builder.push_record([
        "Location",
        "Region",
        "Temp (C)",
        "Min",
        "Max",
        "Weather",
        "Forecast",
        "Ingested",
    ]);

    for r in records {
        let record = r.to_record();
        builder.push_record([
            r.location.clone(),
            r.region.label().to_string(),
            style::format_optional_temp(record.display_temperature(), opts.no_color),
            style::format_optional_temp(r.min_temp, opts.no_color),
            style::format_optional_temp(r.max_temp, opts.no_color),
            r.description.clone(),
            r.forecast_time.clone(),
            format_timestamp(r.created_at, compact_ts),
        ]);
    }

    let mut table = builder.build();
    style::apply_table_style(&mut table, opts.style);
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

pub fn format_records_json(records: &[StoredRecord], opts: &FormatOptions) -> Result<String> {
    opts.as_json(&records)
}

#[must_use]
pub fn format_stats_text(stats: &StoreStats, opts: &FormatOptions) -> String {
    let mut output = style::format_title("Database statistics", opts.no_color);
    output.push('\n');
    output.push_str(&format!("Total records:    {}\n", stats.total_records));
    output.push_str(&format!("Unique locations: {}\n", stats.unique_locations));
    output.push_str(&format!(
        "Latest update:    {}\n",
        stats
            .latest_update
            .map(|ts| format_timestamp(ts, false))
            .unwrap_or_else(|| "never".to_string())
    ));
    output.push_str(&format!(
        "Lowest min temp:  {}\n",
        style::format_optional_temp(stats.min_temp, opts.no_color)
    ));
    output.push_str(&format!(
        "Highest max temp: {}\n",
        style::format_optional_temp(stats.max_temp, opts.no_color)
    ));
    output
}

pub fn format_stats_json(stats: &StoreStats, opts: &FormatOptions) -> Result<String> {
    opts.as_json(stats)
}

#[must_use]
pub fn format_summary_text(summary: &PipelineSummary, opts: &FormatOptions) -> String {
    let mut output = String::new();
    let line = format!(
        "Stored {} of {} parsed records",
        summary.stored, summary.fetched
    );
    if summary.is_complete() {
        output.push_str(&style::format_success(&line, opts.no_color));
    } else {
        output.push_str(&style::format_warning(
            &format!("{} ({} skipped)", line, summary.skipped()),
            opts.no_color,
        ));
    }
    output.push('\n');
    if let Some(pruned) = summary.pruned {
        output.push_str(&format!("Pruned {} old records\n", pruned));
    }
    output.push('\n');
    output.push_str(&format_stats_text(&summary.stats, opts));
    output
}

pub fn format_summary_json(summary: &PipelineSummary, opts: &FormatOptions) -> Result<String> {
    opts.as_json(summary)
}

/// The temperature colour scale.
#[must_use]
pub fn format_legend(opts: &FormatOptions) -> String {
    let mut output = style::format_title("Temperature scale", opts.no_color);
    output.push('\n');
    for band in TemperatureBand::ALL {
        output.push_str(&format!(
            "{} {:<12} {:<9} {}\n",
            style::band_swatch(band, opts.no_color),
            band.label(),
            band.range_text(),
            band.hex_color()
        ));
    }
    output
}
