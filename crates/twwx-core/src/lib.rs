//! Feed parsing and ingestion for Taiwan CWA weather data.
//!
//! This crate turns the Central Weather Administration's county and city
//! forecast document into [`WeatherRecord`](twwx_types::WeatherRecord)s and
//! appends them to a [`twwx_store::Store`].
//!
//! # Components
//!
//! - [`RegionTable`] / [`classify`]: location name to [`Region`](twwx_types::Region)
//! - [`FeedParser`]: tolerant document parser
//! - [`FeedSource`]: where documents come from ([`FeedClient`], [`FileFeed`], [`MockFeed`])
//! - [`Pipeline`]: init, fetch, parse, store
//!
//! # Example
//!
//! ```no_run
//! use twwx_core::{FeedClient, Pipeline, DEFAULT_FEED_URL};
//! use twwx_store::Store;
//!
//! let store = Store::open_default()?;
//! let client = FeedClient::new(DEFAULT_FEED_URL, std::env::var("TWWX_API_KEY")?)?;
//!
//! let summary = Pipeline::new(client, &store).with_retention(7).run()?;
//! println!("Stored {}/{} records", summary.stored, summary.fetched);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod document;
pub mod error;
pub mod mock;
pub mod parser;
pub mod pipeline;
pub mod region;
pub mod sample;
pub mod traits;

pub use client::{DEFAULT_FEED_URL, DEFAULT_TIMEOUT, FeedClient, FileFeed};
pub use document::Node;
pub use error::{FetchError, ParseError, PipelineError};
pub use mock::MockFeed;
pub use parser::{ElementKind, FeedParser, UNKNOWN_LOCATION, parse};
pub use pipeline::{Pipeline, PipelineSummary};
pub use region::{RegionTable, classify};
pub use sample::{sample_records, sample_records_at};
pub use traits::FeedSource;

// Re-export the crates callers need alongside this one.
pub use twwx_store;
pub use twwx_types;
