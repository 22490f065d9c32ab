//! Prune command - age-based retention.

use anyhow::{Result, bail};

use super::Context;
use crate::style;

pub fn cmd_prune(days: Option<u32>, ctx: &Context) -> Result<()> {
    let days = days.unwrap_or(ctx.config.retention.days);
    if days == 0 {
        bail!("Refusing to prune with a retention of 0 days");
    }

    let store = ctx.open_store()?;
    let deleted = store.prune_older_than(days)?;

    if !ctx.quiet {
        println!(
            "{}",
            style::format_success(
                &format!("Deleted {} records older than {} days", deleted, days),
                ctx.opts.no_color
            )
        );
    }
    Ok(())
}
