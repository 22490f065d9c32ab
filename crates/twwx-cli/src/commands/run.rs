//! Run command - fetch, parse and store the feed once.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result, anyhow};
use tracing::{error, info};
use twwx_core::{FeedClient, FeedSource, FileFeed, Pipeline, PipelineError};
use twwx_store::Store;

use super::Context;
use crate::cli::{OutputArgs, OutputFormat};
use crate::config::{API_KEY_ENV, resolve_api_key};
use crate::format;

/// Arguments for the run command.
pub struct RunArgs {
    pub api_key: Option<String>,
    pub url: Option<String>,
    pub timeout: Option<u64>,
    pub file: Option<PathBuf>,
    pub prune: bool,
    pub output: OutputArgs,
}

/// Execute the run command.
///
/// Pipeline failures, including a store that cannot be opened, are
/// returned unwrapped so the caller can map their kind to an exit status.
pub fn cmd_run(args: RunArgs, ctx: &Context) -> Result<()> {
    let source = feed_source(&args, ctx)?;
    let store = Store::open(&ctx.db_path).map_err(|e| {
        error!("Failed to open database at {}: {}", ctx.db_path.display(), e);
        PipelineError::Store(e)
    })?;

    let mut pipeline = Pipeline::new(source, &store);
    if args.prune || ctx.config.retention.prune_after_run {
        info!("Retention enabled: {} days", ctx.config.retention.days);
        pipeline = pipeline.with_retention(ctx.config.retention.days);
    }

    let summary = pipeline.run()?;

    let opts = ctx.options_for(&args.output);
    match args.output.format {
        OutputFormat::Json => print!("{}", format::format_summary_json(&summary, &opts)?),
        _ if ctx.quiet => {}
        _ => print!("{}", format::format_summary_text(&summary, &opts)),
    }

    Ok(())
}

fn feed_source(args: &RunArgs, ctx: &Context) -> Result<Box<dyn FeedSource>> {
    if let Some(path) = &args.file {
        return Ok(Box::new(FileFeed::new(path)));
    }

    let api_key = resolve_api_key(args.api_key.clone(), &ctx.config).ok_or_else(|| {
        anyhow!(
            "No API key configured. Pass --api-key, set {}, or add feed.api_key to {}",
            API_KEY_ENV,
            ctx.config_path.display()
        )
    })?;
    let url = args
        .url
        .clone()
        .unwrap_or_else(|| ctx.config.feed.url.clone());
    let timeout = Duration::from_secs(args.timeout.unwrap_or(ctx.config.feed.timeout_secs));

    let client =
        FeedClient::with_timeout(url, api_key, timeout).context("Failed to create HTTP client")?;
    Ok(Box::new(client))
}
