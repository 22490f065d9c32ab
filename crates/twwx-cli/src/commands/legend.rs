use anyhow::Result;

use super::Context;
use crate::format;

pub fn cmd_legend(ctx: &Context) -> Result<()> {
    print!("{}", format::format_legend(&ctx.opts));
    Ok(())
}
