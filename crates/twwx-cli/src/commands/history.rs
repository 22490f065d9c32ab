//! History command - query stored records.

use anyhow::{Result, bail};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use twwx_store::RecordQuery;
use twwx_types::Region;

use super::{Context, emit_records};
use crate::cli::OutputArgs;

/// Parse a date/time string in RFC3339 or YYYY-MM-DD format.
fn parse_datetime(s: &str) -> Result<OffsetDateTime> {
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Ok(dt);
    }

    // Date only: start of day in UTC
    if let Ok(date) = time::Date::parse(s, format_description!("[year]-[month]-[day]")) {
        return Ok(date.midnight().assume_utc());
    }

    bail!(
        "Invalid date format '{}'. Use RFC3339 (e.g., 2025-01-15T10:30:00Z) or YYYY-MM-DD",
        s
    )
}

/// Arguments for the history command.
pub struct HistoryArgs {
    pub location: Option<String>,
    pub region: Option<Region>,
    pub since: Option<String>,
    pub limit: u32,
    pub oldest_first: bool,
    pub output: OutputArgs,
}

impl HistoryArgs {
    fn to_query(&self) -> Result<RecordQuery> {
        let mut query = RecordQuery::new();
        if let Some(location) = &self.location {
            query = query.location(location);
        }
        if let Some(region) = self.region {
            query = query.region(region);
        }
        if let Some(since) = &self.since {
            query = query.since(parse_datetime(since)?);
        }
        if self.limit > 0 {
            query = query.limit(self.limit);
        }
        if self.oldest_first {
            query = query.oldest_first();
        }
        Ok(query)
    }
}

pub fn cmd_history(args: HistoryArgs, ctx: &Context) -> Result<()> {
    let query = args.to_query()?;
    let store = ctx.open_store()?;
    let records = store.query_records(&query)?;

    let title = match (&args.location, args.region) {
        (Some(location), _) => format!("History: {}", location),
        (None, Some(region)) => format!("History: {}", region),
        (None, None) => "History".to_string(),
    };

    emit_records(&store, &title, &records, &args.output, ctx)
}
