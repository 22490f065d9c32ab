//! Seed command - insert demonstration records.

use anyhow::Result;
use twwx_core::sample_records;

use super::Context;
use crate::{format, style};

pub fn cmd_seed(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let records = sample_records();
    let inserted = store.insert_many(&records)?;

    if !ctx.quiet {
        println!(
            "{}",
            style::format_success(
                &format!("Inserted {} sample records", inserted),
                ctx.opts.no_color
            )
        );
        println!();
        print!("{}", format::format_stats_text(&store.stats()?, &ctx.opts));
    }
    Ok(())
}
