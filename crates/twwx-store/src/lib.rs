//! Local persistence for normalized weather feed records.
//!
//! This crate provides SQLite-based, append-only storage for the records
//! produced by the feed parser, along with the queries the front end needs.
//!
//! # Features
//!
//! - Append records in batches, skipping individual rows that fail
//! - Latest record per location, keyed on ingestion time
//! - Full history with filters
//! - Aggregate statistics
//! - Age-based retention pruning
//! - CSV export
//!
//! # Example
//!
//! ```no_run
//! use twwx_store::Store;
//!
//! let store = Store::open_default()?;
//!
//! for record in store.latest_per_location()? {
//!     println!("{} ({}): {:?}", record.location, record.region, record.current_temp);
//! }
//! # Ok::<(), twwx_store::Error>(())
//! ```

mod error;
mod models;
mod queries;
mod schema;
mod store;

pub use error::{Error, Result};
pub use models::{StoreStats, StoredRecord};
pub use queries::RecordQuery;
pub use store::Store;

/// Default database path following platform conventions.
///
/// - Linux: `~/.local/share/twwx/data.db`
/// - macOS: `~/Library/Application Support/twwx/data.db`
/// - Windows: `C:\Users\<user>\AppData\Local\twwx\data.db`
pub fn default_db_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("twwx")
        .join("data.db")
}
