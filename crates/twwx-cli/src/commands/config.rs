//! Config command - inspect or create the configuration file.

use anyhow::{Context as _, Result, bail};

use super::Context;
use crate::cli::ConfigAction;
use crate::config::Config;
use crate::style;

pub fn cmd_config(action: ConfigAction, ctx: &Context) -> Result<()> {
    let path = &ctx.config_path;

    match action {
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Show => {
            if path.exists() {
                println!("# {}", path.display());
            } else {
                println!("# {} (not found, showing defaults)", path.display());
            }
            let content = toml::to_string_pretty(&ctx.config.redacted())
                .context("Failed to serialize config")?;
            print!("{}", content);
            println!("# database: {}", ctx.db_path.display());
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "Config file already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save(path)?;
            println!(
                "{}",
                style::format_success(
                    &format!("Wrote default config to {}", path.display()),
                    ctx.opts.no_color
                )
            );
        }
    }
    Ok(())
}
