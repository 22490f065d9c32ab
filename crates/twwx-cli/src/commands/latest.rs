//! Latest command - one current record per location.

use anyhow::Result;
use twwx_types::Region;

use super::{Context, emit_records};
use crate::cli::OutputArgs;

pub fn cmd_latest(region: Option<Region>, output: &OutputArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    let (title, records) = match region {
        Some(region) => (
            format!("Latest weather: {} ({})", region, region.local_name()),
            store.latest_in_region(region)?,
        ),
        None => ("Latest weather".to_string(), store.latest_per_location()?),
    };

    emit_records(&store, &title, &records, output, ctx)
}
