//! Trait abstraction for feed sources.
//!
//! The [`FeedSource`] trait abstracts over the live HTTP feed, saved
//! documents on disk and mock feeds for testing.

use serde_json::Value;

use crate::error::FetchError;

/// Something that can produce a raw feed document.
///
/// # Example
///
/// ```
/// use twwx_core::{FeedSource, FetchError, MockFeed};
///
/// fn count_top_level_keys<S: FeedSource>(source: &S) -> Result<usize, FetchError> {
///     let doc = source.fetch()?;
///     Ok(doc.as_object().map_or(0, |o| o.len()))
/// }
///
/// let feed = MockFeed::new(serde_json::json!({"cwaopendata": {}}));
/// assert_eq!(count_top_level_keys(&feed).unwrap(), 1);
/// ```
pub trait FeedSource {
    /// Retrieve the current document.
    fn fetch(&self) -> Result<Value, FetchError>;

    /// Short human-readable description of where documents come from.
    fn describe(&self) -> String {
        "feed".to_string()
    }
}

impl<S: FeedSource + ?Sized> FeedSource for &S {
    fn fetch(&self) -> Result<Value, FetchError> {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<S: FeedSource + ?Sized> FeedSource for Box<S> {
    fn fetch(&self) -> Result<Value, FetchError> {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
