//! Error types for twwx-core.
//!
//! The taxonomy mirrors how far a failure reaches:
//!
//! | Error | Scope | Handling |
//! |-------|-------|----------|
//! | [`FetchError`] | whole run | pipeline reports a fetch failure |
//! | [`ParseError`] | whole document | parser logs it and yields no records |
//! | [`PipelineError`] | whole run | returned from [`crate::Pipeline::run`] |
//!
//! Problems confined to one location entry or one field never become
//! errors; the parser skips the entry or leaves the field unset.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while obtaining the raw feed document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, TLS, timeout, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("Feed returned HTTP status {0}")]
    Status(u16),

    /// The body was not valid JSON.
    #[error("Invalid JSON in feed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The feed answered with a blank document (`null`, `{}`, `[]`, ...).
    #[error("Feed returned an empty document")]
    Empty,

    /// A saved feed document could not be read.
    #[error("Failed to read feed file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Structural failure: the document does not have the expected containers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A required container is absent along the access path.
    #[error("Missing `{0}` in feed document")]
    MissingKey(String),

    /// A container exists but has the wrong shape.
    #[error("Expected {expected} at `{path}`")]
    UnexpectedShape { path: String, expected: &'static str },
}

/// Why a pipeline run did not succeed.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The store could not be initialized or queried.
    #[error("Record store failed: {0}")]
    Store(#[from] twwx_store::Error),

    /// The feed could not be fetched.
    #[error("Failed to fetch weather feed: {0}")]
    Fetch(#[source] FetchError),

    /// The feed was fetched but produced no records.
    #[error("No weather records parsed from feed")]
    Parse,

    /// Records were parsed but none could be stored.
    #[error("None of the {fetched} parsed records could be stored")]
    NothingStored { fetched: usize },
}

impl PipelineError {
    /// Short machine-friendly name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Store(_) | PipelineError::NothingStored { .. } => "store",
            PipelineError::Fetch(_) => "fetch",
            PipelineError::Parse => "parse",
        }
    }
}
