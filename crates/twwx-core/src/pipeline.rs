//! One ingest run: fetch, parse, store.

use serde::Serialize;
use tracing::{error, info, warn};
use twwx_store::{Store, StoreStats};

use crate::document::is_blank;
use crate::error::{FetchError, PipelineError};
use crate::parser::FeedParser;
use crate::traits::FeedSource;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSummary {
    /// Records parsed from the document.
    pub fetched: usize,
    /// Records actually persisted.
    pub stored: usize,
    /// Rows removed by retention pruning, when enabled.
    pub pruned: Option<usize>,
    /// Store snapshot taken after the insert.
    pub stats: StoreStats,
}

impl PipelineSummary {
    /// Number of parsed records the store rejected.
    pub fn skipped(&self) -> usize {
        self.fetched.saturating_sub(self.stored)
    }

    /// Whether every parsed record was stored.
    pub fn is_complete(&self) -> bool {
        self.skipped() == 0
    }
}

/// Sequences a feed source, the parser and a store.
///
/// Nothing is cached between runs; every run reads the store afresh.
///
/// # Example
///
/// ```
/// use twwx_core::{MockFeed, Pipeline};
/// use twwx_store::Store;
///
/// let store = Store::open_in_memory()?;
/// let feed = MockFeed::new(serde_json::json!({"cwaopendata": {"dataset": {"location": [
///     {"locationName": "臺北市", "weatherElement": []}
/// ]}}}));
///
/// let summary = Pipeline::new(&feed, &store).run()?;
/// assert_eq!(summary.stored, 1);
/// assert_eq!(summary.stats.total_records, 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Pipeline<'a, S> {
    source: S,
    store: &'a Store,
    parser: FeedParser,
    retention_days: Option<u32>,
}

impl<'a, S: FeedSource> Pipeline<'a, S> {
    pub fn new(source: S, store: &'a Store) -> Self {
        Self {
            source,
            store,
            parser: FeedParser::new(),
            retention_days: None,
        }
    }

    pub fn with_parser(mut self, parser: FeedParser) -> Self {
        self.parser = parser;
        self
    }

    /// Prune rows older than `days` after each successful insert.
    pub fn with_retention(mut self, days: u32) -> Self {
        self.retention_days = Some(days);
        self
    }

    pub fn run(&self) -> Result<PipelineSummary, PipelineError> {
        info!("[1/4] Initializing record store");
        self.store.init()?;

        info!("[2/4] Fetching feed from {}", self.source.describe());
        let doc = self.source.fetch().map_err(|e| {
            error!("Fetch failed: {}", e);
            PipelineError::Fetch(e)
        })?;
        if is_blank(&doc) {
            error!("Fetch returned nothing");
            return Err(PipelineError::Fetch(FetchError::Empty));
        }

        info!("[3/4] Parsing feed document");
        let records = self.parser.parse(&doc);
        if records.is_empty() {
            error!("No weather records parsed");
            return Err(PipelineError::Parse);
        }

        info!("[4/4] Storing {} records", records.len());
        let stored = self.store.insert_many(&records)?;
        if stored == 0 {
            error!("None of the {} parsed records were stored", records.len());
            return Err(PipelineError::NothingStored {
                fetched: records.len(),
            });
        }
        if stored < records.len() {
            warn!("Stored {} of {} parsed records", stored, records.len());
        }

        let pruned = match self.retention_days {
            Some(days) => Some(self.store.prune_older_than(days)?),
            None => None,
        };

        let stats = self.store.stats()?;
        info!(
            "Pipeline complete: {} fetched, {} stored, {} locations in store",
            records.len(),
            stored,
            stats.unique_locations
        );

        Ok(PipelineSummary {
            fetched: records.len(),
            stored,
            pruned,
            stats,
        })
    }
}
