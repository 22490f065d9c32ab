//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use twwx_types::Region;

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Visual styling mode for output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StyleMode {
    /// Rounded tables and coloured values (default)
    #[default]
    Rich,
    /// Plain text with no decorations (for scripting)
    Plain,
}

/// Reusable output format arguments
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output compact JSON (no pretty-printing)
    #[arg(long)]
    pub compact: bool,
}

#[derive(Parser)]
#[command(name = "twwx")]
#[command(author, version, about = "Taiwan CWA weather feed collector", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    pub no_color: bool,

    /// Visual styling mode (rich, plain)
    #[arg(
        long,
        global = true,
        value_enum,
        default_value = "rich",
        env = "TWWX_STYLE"
    )]
    pub style: StyleMode,

    /// Database file (overrides storage.path in the config)
    #[arg(long, global = true, env = "TWWX_DB")]
    pub db: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "TWWX_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the feed, parse it and store the records
    Run {
        /// CWA open data API key
        #[arg(short = 'k', long, env = "TWWX_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Feed URL (overrides feed.url in the config)
        #[arg(long)]
        url: Option<String>,

        /// Request timeout in seconds
        #[arg(short = 'T', long)]
        timeout: Option<u64>,

        /// Read a saved feed document instead of calling the API
        #[arg(long, conflicts_with_all = ["api_key", "url", "timeout"])]
        file: Option<PathBuf>,

        /// Prune old records after storing (uses retention.days)
        #[arg(long)]
        prune: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the latest record for every location
    Latest {
        /// Only show one region (English label or local name)
        #[arg(short, long)]
        region: Option<Region>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show stored history
    History {
        /// Exact location name
        #[arg(short, long)]
        location: Option<String>,

        /// Region (English label or local name)
        #[arg(short, long)]
        region: Option<Region>,

        /// Only records ingested since this date/time (RFC3339 or YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,

        /// Maximum number of records (0 for all)
        #[arg(short = 'n', long, default_value = "50")]
        limit: u32,

        /// Oldest records first
        #[arg(long)]
        oldest_first: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show store statistics
    Stats {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Delete records older than a number of days
    Prune {
        /// Age in days (defaults to retention.days)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Insert demonstration records for every county and city
    Seed,

    /// Show the temperature colour scale
    Legend,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Configuration subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Show current configuration (API key redacted)
    Show,

    /// Show configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
