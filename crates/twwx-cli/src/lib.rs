//! Command-line front end for the Taiwan CWA weather feed pipeline.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `run` | Fetch the feed, parse it and store the records |
//! | `latest` | Latest record per location |
//! | `history` | Stored records with filters |
//! | `stats` | Store statistics |
//! | `prune` | Delete records older than N days |
//! | `seed` | Insert demonstration records |
//! | `legend` | Temperature colour scale |
//! | `config` | Manage CLI configuration |
//! | `completions` | Generate shell completions |
//!
//! # Output Formats
//!
//! - **Text** (default): tables with temperatures coloured by band
//! - **JSON**: machine-readable
//! - **CSV**: every stored column, with a header row
//!
//! # Configuration
//!
//! `~/.config/twwx/config.toml` (or platform equivalent):
//!
//! ```toml
//! [feed]
//! url = "https://opendata.cwa.gov.tw/fileapi/v1/opendataapi/F-A0010-001"
//! timeout_secs = 30
//!
//! [storage]
//! path = "/var/lib/twwx/data.db"
//!
//! [retention]
//! days = 7
//! prune_after_run = false
//! ```
//!
//! # Environment Variables
//!
//! - `TWWX_API_KEY`: CWA open data API key (overridden by `--api-key`)
//! - `TWWX_DB`: database file (same as `--db`)
//! - `TWWX_CONFIG`: configuration file (same as `--config`)
//! - `NO_COLOR`: disable colored output when set
//!
//! # Examples
//!
//! ```bash
//! TWWX_API_KEY=CWA-XXXX twwx run --prune
//! twwx latest --region North
//! twwx history --location 臺北市 --format csv > taipei.csv
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod format;
pub mod style;

pub use twwx_core;
pub use twwx_store;
pub use twwx_types;
