use anyhow::Result;

use super::Context;
use crate::cli::{OutputArgs, OutputFormat};
use crate::format;

pub fn cmd_stats(output: &OutputArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let stats = store.stats()?;
    let opts = ctx.options_for(output);

    match output.format {
        OutputFormat::Json => print!("{}", format::format_stats_json(&stats, &opts)?),
        OutputFormat::Csv => {
            println!("total_records,unique_locations,latest_update,min_temp,max_temp");
            println!(
                "{},{},{},{},{}",
                stats.total_records,
                stats.unique_locations,
                stats
                    .latest_update
                    .and_then(|ts| ts.format(&time::format_description::well_known::Rfc3339).ok())
                    .unwrap_or_default(),
                stats.min_temp.map(|t| t.to_string()).unwrap_or_default(),
                stats.max_temp.map(|t| t.to_string()).unwrap_or_default(),
            );
        }
        OutputFormat::Text => print!("{}", format::format_stats_text(&stats, &opts)),
    }

    Ok(())
}
