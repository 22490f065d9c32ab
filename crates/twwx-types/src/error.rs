//! Error types for twwx-types.

use thiserror::Error;

/// Errors that can occur when converting shared types from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TypeError {
    /// The text does not name a known region.
    #[error("Unknown region: {0}")]
    UnknownRegion(String),
}
