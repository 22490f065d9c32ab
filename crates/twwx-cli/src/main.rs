use std::io;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;
use twwx_core::PipelineError;

use twwx_cli::cli::{Cli, Commands};
use twwx_cli::commands::{self, Context, HistoryArgs, RunArgs};
use twwx_cli::config::{Config, default_config_path};
use twwx_cli::format::FormatOptions;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<PipelineError>() {
                Some(failure) => eprintln!("Error ({} failure): {:#}", failure.kind(), e),
                None => eprintln!("Error: {:#}", e),
            }
            exit_code(&e)
        }
    }
}

/// Distinct exit statuses per pipeline failure kind.
fn exit_code(e: &anyhow::Error) -> ExitCode {
    match e.downcast_ref::<PipelineError>() {
        Some(PipelineError::Fetch(_)) => ExitCode::from(2),
        Some(PipelineError::Parse) => ExitCode::from(3),
        Some(PipelineError::Store(_) | PipelineError::NothingStored { .. }) => ExitCode::from(4),
        None => ExitCode::FAILURE,
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "twwx", &mut io::stdout());
        return Ok(());
    }

    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = Config::load_or_default(&config_path)?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| config.storage.resolved_path());

    let ctx = Context {
        config,
        config_path,
        db_path,
        opts: FormatOptions::new(cli.no_color, cli.style),
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Run {
            api_key,
            url,
            timeout,
            file,
            prune,
            output,
        } => commands::cmd_run(
            RunArgs {
                api_key,
                url,
                timeout,
                file,
                prune,
                output,
            },
            &ctx,
        ),
        Commands::Latest { region, output } => commands::cmd_latest(region, &output, &ctx),
        Commands::History {
            location,
            region,
            since,
            limit,
            oldest_first,
            output,
        } => commands::cmd_history(
            HistoryArgs {
                location,
                region,
                since,
                limit,
                oldest_first,
                output,
            },
            &ctx,
        ),
        Commands::Stats { output } => commands::cmd_stats(&output, &ctx),
        Commands::Prune { days } => commands::cmd_prune(days, &ctx),
        Commands::Seed => commands::cmd_seed(&ctx),
        Commands::Legend => commands::cmd_legend(&ctx),
        Commands::Config { action } => commands::cmd_config(action, &ctx),
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}
