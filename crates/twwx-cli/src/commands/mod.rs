//! Command implementations for the CLI.

mod config;
mod history;
mod latest;
mod legend;
mod prune;
mod run;
mod seed;
mod stats;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use twwx_store::{Store, StoredRecord};

use crate::cli::{OutputArgs, OutputFormat};
use crate::config::Config;
use crate::format::{self, FormatOptions};

pub use config::cmd_config;
pub use history::{HistoryArgs, cmd_history};
pub use latest::cmd_latest;
pub use legend::cmd_legend;
pub use prune::cmd_prune;
pub use run::{RunArgs, cmd_run};
pub use seed::cmd_seed;
pub use stats::cmd_stats;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    pub db_path: PathBuf,
    pub opts: FormatOptions,
    pub quiet: bool,
}

impl Context {
    pub fn open_store(&self) -> Result<Store> {
        Store::open(&self.db_path)
            .with_context(|| format!("Failed to open database at {}", self.db_path.display()))
    }

    fn options_for(&self, output: &OutputArgs) -> FormatOptions {
        self.opts.with_compact(output.compact)
    }
}

/// Print records in the requested format.
fn emit_records(
    store: &Store,
    title: &str,
    records: &[StoredRecord],
    output: &OutputArgs,
    ctx: &Context,
) -> Result<()> {
    let opts = ctx.options_for(output);
    match output.format {
        OutputFormat::Text => print!("{}", format::format_records_text(title, records, &opts)),
        OutputFormat::Json => print!("{}", format::format_records_json(records, &opts)?),
        OutputFormat::Csv => {
            let mut stdout = std::io::stdout().lock();
            store.export_csv(records, &mut stdout)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
