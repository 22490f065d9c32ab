//! Mock feed source for testing.
//!
//! [`MockFeed`] implements [`FeedSource`] and hands out a canned document,
//! with optional failure injection.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicU32, Ordering};

use serde_json::Value;

use crate::document::is_blank;
use crate::error::FetchError;
use crate::traits::FeedSource;

/// A canned feed.
///
/// # Example
///
/// ```
/// use twwx_core::{FeedSource, MockFeed};
///
/// let feed = MockFeed::new(serde_json::json!({"cwaopendata": {}}));
/// assert!(feed.fetch().is_ok());
///
/// feed.set_should_fail(true);
/// assert!(feed.fetch().is_err());
/// assert_eq!(feed.fetch_count(), 2);
/// ```
#[derive(Debug)]
pub struct MockFeed {
    document: Mutex<Value>,
    should_fail: AtomicBool,
    fail_status: AtomicU16,
    fetch_count: AtomicU32,
}

impl MockFeed {
    pub fn new(document: Value) -> Self {
        Self {
            document: Mutex::new(document),
            should_fail: AtomicBool::new(false),
            fail_status: AtomicU16::new(503),
            fetch_count: AtomicU32::new(0),
        }
    }

    /// A feed whose every fetch fails with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        let feed = Self::new(Value::Null);
        feed.fail_status.store(status, Ordering::Relaxed);
        feed.set_should_fail(true);
        feed
    }

    pub fn set_document(&self, document: Value) {
        if let Ok(mut guard) = self.document.lock() {
            *guard = document;
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }

    /// Number of fetch attempts so far, failed ones included.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }
}

impl FeedSource for MockFeed {
    fn fetch(&self) -> Result<Value, FetchError> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);

        if self.should_fail.load(Ordering::Relaxed) {
            return Err(FetchError::Status(self.fail_status.load(Ordering::Relaxed)));
        }

        let document = self
            .document
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(Value::Null);
        if is_blank(&document) {
            return Err(FetchError::Empty);
        }
        Ok(document)
    }

    fn describe(&self) -> String {
        "mock feed".to_string()
    }
}
