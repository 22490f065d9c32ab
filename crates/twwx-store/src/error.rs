//! Error types for twwx-store.

use std::path::PathBuf;

/// Result type for twwx-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in twwx-store.
///
/// Query operations surface these instead of returning empty results, so
/// callers can tell an unreachable store apart from one with no data yet.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error from SQLite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failed to create database directory.
    #[error("Failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// CSV export error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
